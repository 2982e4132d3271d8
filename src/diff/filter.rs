//! Report lines for a listing.

use std::fmt;

use crate::core::Manifest;

/// Minimum width keys are padded to in report lines.
pub const REPORT_COLUMN_WIDTH: usize = 60;

/// One line of a listing report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    /// A key that passed (or was not subject to) validation.
    Entry(String),
    /// A key whose release name failed validation.
    Invalid(String),
}

impl ReportLine {
    pub fn key(&self) -> &str {
        match self {
            ReportLine::Entry(key) | ReportLine::Invalid(key) => key,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ReportLine::Invalid(_))
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLine::Entry(key) => write!(f, "{:<width$}", key, width = REPORT_COLUMN_WIDTH),
            ReportLine::Invalid(key) => write!(
                f,
                ">>> INVALID MODULE NAME: {:<width$} <<<",
                key,
                width = REPORT_COLUMN_WIDTH
            ),
        }
    }
}

/// The module part of a key: everything before the first `/`.
pub fn base_name(key: &str) -> &str {
    key.split_once('/').map_or(key, |(base, _)| base)
}

/// Check that a key's release part looks like `/R<digits>[.<digits>...][-...]`.
///
/// After the first `/` the key must start with `R` and contain a `.`; once
/// the `R` is removed, every piece between `-` and `.` separators must be a
/// non-empty run of decimal digits.
pub fn validate_module_name(key: &str) -> bool {
    let Some((_, release)) = key.split_once('/') else {
        return false;
    };
    let Some(numbers) = release.strip_prefix('R') else {
        return false;
    };
    if !numbers.contains('.') {
        return false;
    }

    numbers
        .split('-')
        .flat_map(|part| part.split('.'))
        .all(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()))
}

/// Build report lines for a listing.
///
/// Only the first key of each contiguous run sharing a base name is kept.
/// With `validate` set, kept keys with a malformed release name are marked
/// [`ReportLine::Invalid`] instead of being dropped.
pub fn filter_entries(manifest: &Manifest, validate: bool) -> Vec<ReportLine> {
    let mut lines = Vec::new();
    let mut previous: Option<&str> = None;

    for key in manifest.keys() {
        let base = base_name(key);
        if previous == Some(base) {
            continue;
        }
        previous = Some(base);

        if validate && !validate_module_name(key) {
            lines.push(ReportLine::Invalid(key.to_string()));
        } else {
            lines.push(ReportLine::Entry(key.to_string()));
        }
    }

    lines
}
