//! EPICS build analysis - compare module listings between EPICS releases and
//! resolve module dependency trees.
//!
//! The library is split the same way the analysis runs:
//! - [`core`]: items, listings and the universe of known items
//! - [`depfile`]: parsing of RELEASE / CONFIG_SITE / Makefile declarations
//! - [`diff`]: listing difference and report filtering
//! - [`resolver`]: dependency tree resolution
//! - [`ops`]: the operations behind each CLI command

pub mod core;
pub mod depfile;
pub mod diff;
pub mod ops;
pub mod resolver;
pub mod util;

pub use crate::core::{Item, ItemId, ItemKind, Manifest, Universe};
pub use resolver::{resolve, resolve_all, DependencyGraph};
pub use util::Config;
