//! `epics-build-analysis compare` command

use anyhow::Result;

use crate::cli::CompareArgs;
use epics_build_analysis::ops::{self, CompareOptions};
use epics_build_analysis::Config;

pub fn execute(config: &Config, args: CompareArgs) -> Result<()> {
    let opts = options(args);
    let result = ops::compare(config, &opts)?;

    println!(
        "{} modules of {} are not in {}",
        result.removed.len(),
        opts.first_version,
        opts.second_version
    );
    println!("  diff:     {}", result.diff_path.display());
    println!("  filtered: {}", result.filtered_path.display());

    Ok(())
}

pub fn options(args: CompareArgs) -> CompareOptions {
    CompareOptions {
        first_version: args.first_epics_version,
        second_version: args.second_epics_version,
        first_listing: args.first_listing,
        second_listing: args.second_listing,
    }
}
