//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use epics_build_analysis::ItemKind;

/// Compare EPICS module listings and analyze module dependencies
#[derive(Parser)]
#[command(name = "epics-build-analysis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./epics-build-analysis.toml)
    #[arg(long, global = true, env = "EPICS_BUILD_ANALYSIS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for reports and graphs (overrides the config file)
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List modules of the first version missing from the second
    Compare(CompareArgs),

    /// Resolve the module dependency tree of an EPICS version
    Deps(DepsArgs),

    /// Compare two versions, then analyze dependencies of the second
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// The first EPICS version for module listing comparison
    pub first_epics_version: String,

    /// The second EPICS version for module listing comparison
    pub second_epics_version: String,

    /// Read the first listing from a file instead of running the inventory command
    #[arg(long)]
    pub first_listing: Option<PathBuf>,

    /// Read the second listing from a file instead of running the inventory command
    #[arg(long)]
    pub second_listing: Option<PathBuf>,
}

#[derive(Args)]
pub struct DepsArgs {
    /// EPICS base version to analyze
    pub base_version: String,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub compare: CompareArgs,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Also include these item kinds (ioc, package, driver)
    #[arg(long, value_delimiter = ',')]
    pub include: Vec<ItemKind>,

    /// Also write the dependency graph as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write produced/linked libraries for each item
    #[arg(long)]
    pub libraries: bool,
}
