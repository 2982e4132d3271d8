//! Item identification - WHICH item (name + version).
//!
//! An `ItemId` identifies one release directory of a module, IOC, package or
//! kernel driver. Unresolved dependencies use the same type, so the graph
//! never has to concatenate strings to compare identities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator used when an identity is rendered as text (`name|version`).
pub const ID_SEPARATOR: char = '|';

/// A unique identifier for an item: the pair (name, version).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId {
    name: String,
    version: String,
}

impl ItemId {
    /// Create a new item ID.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        ItemId {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Get the item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the item version (usually a release directory name like `R4.3`).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Label used for graph nodes: `name version`.
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, ID_SEPARATOR, self.version)
    }
}

/// Error parsing an `ItemId` from its `name|version` text form.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid item id `{0}`: expected `name|version`")]
pub struct ParseItemIdError(String);

impl FromStr for ItemId {
    type Err = ParseItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(ID_SEPARATOR) {
            Some((name, version)) if !name.is_empty() => Ok(ItemId::new(name, version)),
            _ => Err(ParseItemIdError(s.to_string())),
        }
    }
}
