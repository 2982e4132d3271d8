//! RELEASE and CONFIG_SITE parsing.
//!
//! EPICS modules pin their dependencies in `configure/RELEASE*` files:
//!
//! ```text
//! ASYN_MODULE_VERSION = R4.39-1.0.1
//! ASYN = $(EPICS_MODULES)/asyn/$(ASYN_MODULE_VERSION)
//! EPICS_BASE = $(EPICS_SITE_TOP)/base/$(BASE_MODULE_VERSION)
//! ```
//!
//! The second line is a *folder* binding (`asyn` -> `ASYN_MODULE_VERSION`),
//! the first a *release* binding (`ASYN_MODULE_VERSION` -> `R4.39-1.0.1`).
//! Joining the two gives `asyn -> R4.39-1.0.1`. The base module is never
//! pinned locally, so it is recorded with [`BASE_VERSION_PLACEHOLDER`] and
//! substituted by the resolver.

use std::io;
use std::path::Path;
use std::sync::LazyLock;

use glob::glob;
use indexmap::IndexMap;
use regex::Regex;

use crate::util::fs::read_lossy;

/// Dependency name to required version, in declaration order.
pub type DependencyMap = IndexMap<String, String>;

/// Version recorded for the base module; replaced by the distribution's
/// base version at resolution time. Compared case-insensitively.
pub const BASE_VERSION_PLACEHOLDER: &str = "BASE_MODULE_VERSION";

/// Glob (relative to the item path) for module dependency files.
pub const RELEASE_PATTERN: &str = "configure/RELEASE*";

/// Glob (relative to the item path) for package dependency files.
pub const CONFIG_SITE_PATTERN: &str = "configure/CONFIG_SITE*";

static FOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(.*)/\$\((.*_VERSION.*)\)").expect("valid folder regex"));

static RELEASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^\s*[^#].*_VERSION)=(.*)").expect("valid release regex"));

/// Check whether a recorded version is the base version placeholder.
pub fn is_base_placeholder(version: &str) -> bool {
    version.eq_ignore_ascii_case(BASE_VERSION_PLACEHOLDER)
}

/// Bindings extracted from a single RELEASE or CONFIG_SITE file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileBindings {
    /// `/<dependency>/$(<VARNAME>)`: dependency name to variable name.
    pub folders: IndexMap<String, String>,

    /// `<VARNAME>=<version>`: variable name to version.
    pub releases: IndexMap<String, String>,

    /// Non-comment lines with whitespace removed.
    pub lines: Vec<String>,
}

/// Remove whitespace and `+` so `X += y` and `X=y` read the same.
fn clear_line(line: &str) -> String {
    line.chars()
        .filter(|c| !c.is_whitespace() && *c != '+')
        .collect()
}

/// Extract folder and release bindings from the contents of one file.
pub fn parse_bindings(contents: &str) -> FileBindings {
    let mut bindings = FileBindings::default();

    for raw in contents.lines() {
        if raw.starts_with('#') {
            continue;
        }
        let line = clear_line(raw);

        if let Some(caps) = FOLDER_RE.captures(&line) {
            bindings
                .folders
                .insert(caps[1].to_string(), caps[2].to_string());
        }
        if let Some(caps) = RELEASE_RE.captures(&line) {
            bindings
                .releases
                .insert(caps[1].to_string(), caps[2].to_string());
        }

        bindings.lines.push(line);
    }

    bindings
}

/// Join a file's folder bindings against its release bindings into `deps`.
fn merge_bindings(bindings: &FileBindings, deps: &mut DependencyMap, file: &Path) {
    for (name, variable) in &bindings.folders {
        // Still parameterized, e.g. `$(ARCH)/foo`
        if name.contains('(') {
            continue;
        }

        if name.contains("base") {
            deps.insert(name.clone(), BASE_VERSION_PLACEHOLDER.to_string());
            continue;
        }

        match bindings.releases.get(variable) {
            Some(version) => {
                deps.insert(name.clone(), version.clone());
            }
            None => {
                tracing::debug!(
                    "Problems with {} and dependencies: {} (undefined `{}`)",
                    file.display(),
                    name,
                    variable
                );
            }
        }
    }
}

/// Collect dependencies from every file under `root` matching `pattern`.
///
/// Files whose name contains `~` (editor backups) are skipped. Unreadable
/// files are logged and contribute nothing. When no dependency was found in
/// any file but one of them mentions `EPICS_BASE`, a single `base` entry
/// with the placeholder version is recorded.
pub fn collect_dependencies(root: &Path, pattern: &str) -> DependencyMap {
    let mut deps = DependencyMap::new();
    let mut mentions_base = false;

    let full_pattern = root.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let entries = match glob(&pattern_str) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("invalid glob pattern {}: {}", pattern_str, e);
            return deps;
        }
    };

    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("glob error: {}", e);
                continue;
            }
        };

        let is_backup = path
            .file_name()
            .map(|n| n.to_string_lossy().contains('~'))
            .unwrap_or(false);
        if is_backup {
            continue;
        }

        let contents = match read_lossy(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::error!("Could not find file: {}", path.display());
                continue;
            }
            Err(e) => {
                tracing::error!("Could not read file {}: {}", path.display(), e);
                continue;
            }
        };

        let bindings = parse_bindings(&contents);
        merge_bindings(&bindings, &mut deps, &path);

        if bindings.lines.iter().any(|l| l.contains("EPICS_BASE")) {
            mentions_base = true;
        }
    }

    if deps.is_empty() && mentions_base {
        deps.insert("base".to_string(), BASE_VERSION_PLACEHOLDER.to_string());
    }

    deps
}
