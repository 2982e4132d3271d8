//! Dependency declarations extracted from an item's build files.
//!
//! Everything here is a pure function of the files on disk: the
//! [`Item`](crate::core::Item) type owns the memoization, these functions
//! only compute.
//!
//! - [`release`]: `configure/RELEASE*` and `configure/CONFIG_SITE*` bindings
//! - [`makefile`]: libraries linked through `*_LIBS` Makefile variables
//! - [`libdir`]: libraries produced under `lib/`

pub mod libdir;
pub mod makefile;
pub mod release;

pub use libdir::{collect_library_products, library_base_name};
pub use makefile::{collect_library_dependencies, parse_libs};
pub use release::{
    collect_dependencies, is_base_placeholder, parse_bindings, DependencyMap, FileBindings,
    BASE_VERSION_PLACEHOLDER, CONFIG_SITE_PATTERN, RELEASE_PATTERN,
};
