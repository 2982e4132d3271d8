//! The universe - every known item, keyed by identity.
//!
//! A universe is built by walking category roots two levels deep:
//! `<root>/<name>/<version>/`. Iteration follows insertion order so reports
//! and graphs come out the same on every run.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use walkdir::WalkDir;

use crate::core::{Item, ItemId, ItemKind};

/// A directory whose children are item names, grandchildren releases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRoot {
    pub path: PathBuf,
    pub kind: ItemKind,
}

impl CategoryRoot {
    pub fn new(path: impl Into<PathBuf>, kind: ItemKind) -> Self {
        CategoryRoot {
            path: path.into(),
            kind,
        }
    }
}

/// Ordered mapping from identity to item.
#[derive(Debug, Default)]
pub struct Universe {
    items: IndexMap<ItemId, Item>,
}

impl Universe {
    pub fn new() -> Self {
        Universe::default()
    }

    /// Discover items under each category root, in the order given.
    ///
    /// Roots that do not exist are logged and skipped.
    pub fn discover(roots: &[CategoryRoot]) -> Self {
        let mut universe = Universe::new();

        for root in roots {
            if !root.path.is_dir() {
                tracing::warn!(
                    "skipping {} root {}: not a directory",
                    root.kind,
                    root.path.display()
                );
                continue;
            }

            let before = universe.len();
            for name_dir in subdirectories(&root.path) {
                let Some(name) = dir_name(&name_dir) else {
                    continue;
                };
                for release_dir in subdirectories(&name_dir) {
                    let Some(version) = dir_name(&release_dir) else {
                        continue;
                    };
                    universe.insert(Item::new(release_dir, name.clone(), version, root.kind));
                }
            }

            tracing::info!(
                "Found {} {} items under {}",
                universe.len() - before,
                root.kind,
                root.path.display()
            );
        }

        universe
    }

    /// Insert an item, replacing any item with the same identity.
    pub fn insert(&mut self, item: Item) {
        self.items.insert(item.id().clone(), item);
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    /// Iterate over items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Item> for Universe {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        let mut universe = Universe::new();
        for item in iter {
            universe.insert(item);
        }
        universe
    }
}

/// Immediate subdirectories of `path`, sorted by name.
///
/// Symlinks to directories count; the returned path is the link itself.
fn subdirectories(path: &Path) -> Vec<PathBuf> {
    WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .collect()
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}
