//! Libraries produced by an item, found under its `lib/` directory.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

static LIBRARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+(\.so|\.a)").expect("valid library regex"));

/// Length of the `lib` prefix stripped from library file names.
const LIB_PREFIX_LEN: usize = 3;

/// Base name of a library file: `libasyn.so` -> `asyn`.
///
/// Only the last extension is removed, so versioned shared objects keep
/// part of their suffix (`libasyn.so.4` -> `asyn.so`).
pub fn library_base_name(file_name: &str) -> Option<String> {
    if !LIBRARY_RE.is_match(file_name) {
        return None;
    }

    let stem = Path::new(file_name).file_stem()?.to_string_lossy();
    let base: String = stem.chars().skip(LIB_PREFIX_LEN).collect();

    if base.is_empty() {
        None
    } else {
        Some(base)
    }
}

/// Collect library base names from the top level of `<root>/lib`.
pub fn collect_library_products(root: &Path) -> BTreeSet<String> {
    WalkDir::new(root.join("lib"))
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir())
        .filter_map(|e| library_base_name(&e.file_name().to_string_lossy()))
        .collect()
}
