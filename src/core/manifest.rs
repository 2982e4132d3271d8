//! Module listings produced by the inventory command.
//!
//! Each line of a listing is `<key> <version>` with arbitrary runs of
//! whitespace between the two fields, e.g.
//!
//! ```text
//!   asyn/R4.39-1.0.1      /afs/slac/g/lcls/epics/R7.0.3.1-1.0/modules/asyn/R4.39-1.0.1
//! ```

use indexmap::IndexMap;
use thiserror::Error;

/// Error parsing a listing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("malformed listing line {line_number}: expected `<name> <version>`, got `{line}`")]
    MalformedLine { line_number: usize, line: String },
}

/// An ordered key -> version listing.
///
/// Keys are unique; a repeated key keeps its first position and takes the
/// last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: IndexMap<String, String>,
}

impl Manifest {
    pub fn new() -> Self {
        Manifest::default()
    }

    /// Parse listing lines into a manifest.
    ///
    /// Only the first two whitespace-separated fields of a line are used.
    /// Any line with fewer than two fields is an error.
    pub fn parse<I, S>(lines: I) -> Result<Self, ManifestError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut manifest = Manifest::new();

        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let mut fields = line.split_whitespace();

            match (fields.next(), fields.next()) {
                (Some(key), Some(version)) => manifest.insert(key, version),
                _ => {
                    return Err(ManifestError::MalformedLine {
                        line_number: index + 1,
                        line: line.to_string(),
                    })
                }
            }
        }

        Ok(manifest)
    }

    /// Parse a whole listing file's contents.
    pub fn parse_str(contents: &str) -> Result<Self, ManifestError> {
        Self::parse(contents.lines())
    }

    pub fn insert(&mut self, key: impl Into<String>, version: impl Into<String>) {
        self.entries.insert(key.into(), version.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Manifest {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut manifest = Manifest::new();
        for (k, v) in iter {
            manifest.insert(k, v);
        }
        manifest
    }
}
