//! Library link dependencies declared in Makefiles.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::util::fs::read_lossy;

static LIBS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+_LIBS.*=(.+)").expect("valid libs regex"));

/// Extract library names from `*_LIBS = ...` / `*_LIBS += ...` lines.
pub fn parse_libs(contents: &str) -> BTreeSet<String> {
    contents
        .lines()
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| LIBS_RE.captures(line))
        .flat_map(|caps| {
            caps[1]
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Walk `root` and collect libraries linked by every `*Makefile` found.
pub fn collect_library_dependencies(root: &Path) -> BTreeSet<String> {
    let mut libs = BTreeSet::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_dir() {
            continue;
        }
        if !entry.file_name().to_string_lossy().ends_with("Makefile") {
            continue;
        }

        match read_lossy(entry.path()) {
            Ok(contents) => libs.extend(parse_libs(&contents)),
            Err(e) => {
                tracing::debug!("skipping {}: {}", entry.path().display(), e);
            }
        }
    }

    libs
}
