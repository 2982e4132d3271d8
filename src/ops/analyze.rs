//! Dependency analysis of one EPICS version.
//!
//! Discovers the universe for a base version, resolves the dependency tree
//! of every item and writes the reports.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::{ItemId, ItemKind, Universe};
use crate::resolver::{resolve_all, DependencyGraph};
use crate::util::fs::write_string;
use crate::util::Config;

/// Width dependency entries are padded to in the text report.
const DEPENDENCY_COLUMN_WIDTH: usize = 20;

/// Options for a dependency analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Base version whose universe is analyzed; also substituted for the
    /// base module placeholder
    pub base_version: String,

    /// Categories to include on top of the configured ones
    pub include: Vec<ItemKind>,

    /// Also write the graph as JSON
    pub json: bool,

    /// Also write the produced/linked libraries report
    pub libraries: bool,
}

/// Outcome of an analysis.
#[derive(Debug)]
pub struct AnalyzeResult {
    pub graph: DependencyGraph,
    pub cycles: Vec<Vec<ItemId>>,
    pub report_path: PathBuf,
    pub dot_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub libraries_path: Option<PathBuf>,
}

/// Discover, resolve and report.
pub fn analyze(config: &Config, opts: &AnalyzeOptions) -> Result<AnalyzeResult> {
    let mut config = config.clone();
    for kind in &opts.include {
        config.universe.include(*kind);
    }

    let base = opts.base_version.as_str();
    let universe = Universe::discover(&config.category_roots(base));
    analyze_universe(&config, &universe, opts)
}

/// Resolve and report on an already discovered universe.
pub fn analyze_universe(
    config: &Config,
    universe: &Universe,
    opts: &AnalyzeOptions,
) -> Result<AnalyzeResult> {
    let base = opts.base_version.as_str();
    tracing::info!("Resolving dependencies of {} items", universe.len());

    let graph = resolve_all(universe, base);

    let cycles = graph.cycles();
    for cycle in &cycles {
        let ids: Vec<String> = cycle.iter().map(ItemId::to_string).collect();
        tracing::warn!("dependency cycle between: {}", ids.join(", "));
    }

    let output_dir = &config.paths.output_dir;

    let report_path = output_dir.join(format!("module_dependencies_{}_.txt", base));
    write_string(&report_path, &format_dependency_report(&graph))?;

    let dot_path = output_dir.join(format!("module_dependencies_{}.dot", base));
    write_string(&dot_path, &graph.to_dot(universe))?;

    let json_path = if opts.json {
        let path = output_dir.join(format!("module_dependencies_{}.json", base));
        let json = serde_json::to_string_pretty(&graph)
            .context("failed to serialize dependency graph")?;
        write_string(&path, &json)?;
        Some(path)
    } else {
        None
    };

    let libraries_path = if opts.libraries {
        let path = output_dir.join(format!("libraries_{}.txt", base));
        write_string(&path, &format_library_report(universe))?;
        Some(path)
    } else {
        None
    };

    tracing::info!("Check the output files at '{}'", report_path.display());

    Ok(AnalyzeResult {
        graph,
        cycles,
        report_path,
        dot_path,
        json_path,
        libraries_path,
    })
}

/// Text report of direct dependencies, one block per item, sorted.
pub fn format_dependency_report(graph: &DependencyGraph) -> String {
    let mut out = String::new();

    for (id, deps) in graph.sorted() {
        let _ = writeln!(out, "{}:", id);
        if deps.is_empty() {
            out.push_str("\tNo dependencies found.\n");
        }
        for dep in deps {
            let _ = writeln!(
                out,
                "\t{:<width$}",
                dep.to_string(),
                width = DEPENDENCY_COLUMN_WIDTH
            );
        }
        out.push('\n');
    }

    out
}

/// Libraries each item produces and links against.
pub fn format_library_report(universe: &Universe) -> String {
    fn join(libs: &BTreeSet<String>) -> String {
        if libs.is_empty() {
            "none".to_string()
        } else {
            libs.iter().cloned().collect::<Vec<_>>().join(" ")
        }
    }

    let mut out = String::new();
    for item in universe.items() {
        let _ = writeln!(out, "{}:", item);
        let _ = writeln!(out, "\tproduces: {}", join(item.libraries_produces()));
        let _ = writeln!(out, "\tlinks: {}", join(item.libraries_dependencies()));
        out.push('\n');
    }
    out
}
