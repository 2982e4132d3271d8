//! High-level operations.
//!
//! This module contains the implementation of the CLI commands.

pub mod analyze;
pub mod compare;
pub mod inventory;

pub use analyze::{
    analyze, analyze_universe, format_dependency_report, format_library_report, AnalyzeOptions,
    AnalyzeResult,
};
pub use compare::{compare, CompareOptions, CompareResult};
pub use inventory::{fetch_listing, listing_path, load_listing};
