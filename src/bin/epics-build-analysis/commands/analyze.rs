//! `epics-build-analysis analyze` command

use anyhow::Result;

use crate::cli::AnalyzeArgs;
use crate::commands::{compare, deps};
use epics_build_analysis::ops;
use epics_build_analysis::Config;

pub fn execute(config: &Config, args: AnalyzeArgs) -> Result<()> {
    let compare_opts = compare::options(args.compare);
    let base_version = compare_opts.second_version.clone();

    let compared = ops::compare(config, &compare_opts)?;
    println!(
        "{} modules of {} are not in {}",
        compared.removed.len(),
        compare_opts.first_version,
        compare_opts.second_version
    );

    let analyze_opts = deps::options(base_version, args.report);
    let result = ops::analyze(config, &analyze_opts)?;
    deps::print_summary(&result);

    Ok(())
}
