//! Listing comparison.
//!
//! [`diff_manifests`] finds entries of one listing that the other lacks;
//! [`filter`] turns a listing into report lines, dropping repeated
//! releases of the same module and flagging malformed release names.

pub mod filter;

pub use filter::{base_name, filter_entries, validate_module_name, ReportLine, REPORT_COLUMN_WIDTH};

use crate::core::Manifest;

/// Entries of `first` whose key does not appear in `second`.
///
/// Only keys are compared: an entry present in both listings is dropped
/// even when the versions differ. Order follows `first`.
pub fn diff_manifests(first: &Manifest, second: &Manifest) -> Manifest {
    first
        .iter()
        .filter(|(key, _)| !second.contains_key(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_removes_shared_keys() {
        let first: Manifest = [("modA/R1.0", "x"), ("modB/R2.0", "y")].into_iter().collect();
        let second: Manifest = [("modB/R2.0", "y")].into_iter().collect();

        let diff = diff_manifests(&first, &second);

        assert_eq!(diff.iter().collect::<Vec<_>>(), vec![("modA/R1.0", "x")]);
    }

    #[test]
    fn test_diff_ignores_versions() {
        let first: Manifest = [("modA/R1.0", "x"), ("modB/R2.0", "y")].into_iter().collect();
        let second: Manifest = [("modA/R1.0", "different"), ("modC/R1.0", "z")]
            .into_iter()
            .collect();

        let diff = diff_manifests(&first, &second);

        assert_eq!(diff.keys().collect::<Vec<_>>(), vec!["modB/R2.0"]);
        for key in diff.keys() {
            assert!(!second.contains_key(key));
        }
    }

    #[test]
    fn test_diff_is_repeatable() {
        let first: Manifest = [("a/R1.0", "1"), ("b/R1.0", "2"), ("c/R1.0", "3")]
            .into_iter()
            .collect();
        let second: Manifest = [("b/R1.0", "2")].into_iter().collect();

        let once = diff_manifests(&first, &second);
        let twice = diff_manifests(&first, &second);

        assert_eq!(once, twice);
        assert_eq!(filter_entries(&once, true), filter_entries(&twice, true));
    }
}
