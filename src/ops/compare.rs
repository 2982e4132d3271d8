//! Listing comparison between two EPICS versions.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::Manifest;
use crate::diff::{diff_manifests, filter_entries, ReportLine};
use crate::ops::inventory::{fetch_listing, load_listing};
use crate::util::fs::write_lines;
use crate::util::Config;

/// Options for comparing two versions.
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Version whose modules may have been removed
    pub first_version: String,

    /// Version compared against
    pub second_version: String,

    /// Use this listing instead of running the inventory command
    pub first_listing: Option<PathBuf>,

    /// Use this listing instead of running the inventory command
    pub second_listing: Option<PathBuf>,
}

/// Outcome of a comparison.
#[derive(Debug)]
pub struct CompareResult {
    /// Entries of the first listing missing from the second
    pub removed: Manifest,

    /// Report lines written to `diff_path`
    pub diff_lines: Vec<ReportLine>,

    /// Report lines written to `filtered_path`
    pub filtered_lines: Vec<ReportLine>,

    pub diff_path: PathBuf,
    pub filtered_path: PathBuf,
}

/// Compare two listings and write the diff and filtered reports.
pub fn compare(config: &Config, opts: &CompareOptions) -> Result<CompareResult> {
    let first_path = match &opts.first_listing {
        Some(path) => path.clone(),
        None => fetch_listing(config, &opts.first_version)?,
    };
    let second_path = match &opts.second_listing {
        Some(path) => path.clone(),
        None => fetch_listing(config, &opts.second_version)?,
    };

    let first = load_listing(&first_path)?;
    let second = load_listing(&second_path)?;

    let removed = diff_manifests(&first, &second);
    let diff_lines = filter_entries(&removed, false);
    let filtered_lines = filter_entries(&second, true);

    let output_dir = &config.paths.output_dir;
    let diff_path = output_dir.join(format!(
        "diff_{}_from_{}.txt",
        opts.first_version, opts.second_version
    ));
    let filtered_path = output_dir.join(format!("filtered_{}.txt", opts.second_version));

    write_lines(&diff_path, diff_lines.iter().map(ReportLine::to_string))?;
    write_lines(&filtered_path, filtered_lines.iter().map(ReportLine::to_string))?;

    let invalid = filtered_lines.iter().filter(|l| l.is_invalid()).count();
    tracing::info!(
        "{} entries of {} missing from {}; {} invalid module names in {}",
        removed.len(),
        opts.first_version,
        opts.second_version,
        invalid,
        opts.second_version
    );
    tracing::info!("Check the output files at '{}'", diff_path.display());

    Ok(CompareResult {
        removed,
        diff_lines,
        filtered_lines,
        diff_path,
        filtered_path,
    })
}
