//! `epics-build-analysis deps` command

use anyhow::Result;

use crate::cli::{DepsArgs, ReportArgs};
use epics_build_analysis::ops::{self, AnalyzeOptions, AnalyzeResult};
use epics_build_analysis::Config;

pub fn execute(config: &Config, args: DepsArgs) -> Result<()> {
    let opts = options(args.base_version, args.report);
    let result = ops::analyze(config, &opts)?;
    print_summary(&result);
    Ok(())
}

pub fn options(base_version: String, report: ReportArgs) -> AnalyzeOptions {
    AnalyzeOptions {
        base_version,
        include: report.include,
        json: report.json,
        libraries: report.libraries,
    }
}

pub fn print_summary(result: &AnalyzeResult) {
    println!("Resolved {} items", result.graph.len());
    if !result.cycles.is_empty() {
        println!("warning: {} dependency cycles found", result.cycles.len());
    }
    println!("  report: {}", result.report_path.display());
    println!("  graph:  {}", result.dot_path.display());
    if let Some(path) = &result.json_path {
        println!("  json:   {}", path.display());
    }
    if let Some(path) = &result.libraries_path {
        println!("  libraries: {}", path.display());
    }
}
