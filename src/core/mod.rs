//! Core data structures.
//!
//! - Identities (`ItemId`) and inspectable items (`Item`)
//! - Module listings (`Manifest`)
//! - The set of known items (`Universe`)

pub mod item;
pub mod item_id;
pub mod manifest;
pub mod universe;

pub use item::{Item, ItemKind};
pub use item_id::{ItemId, ParseItemIdError};
pub use manifest::{Manifest, ManifestError};
pub use universe::{CategoryRoot, Universe};
