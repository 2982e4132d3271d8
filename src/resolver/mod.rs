//! Dependency tree resolution.
//!
//! Starting from an item, every declared module dependency and then every
//! declared package dependency is looked up in the universe and expanded
//! depth-first. Resolution never fails:
//!
//! - a dependency with no matching item is recorded as an unresolved leaf
//! - a dependency already on the current path (a declaration cycle) is
//!   recorded but not expanded again

pub mod graph;

pub use graph::DependencyGraph;

use crate::core::{Item, ItemId, Universe};
use crate::depfile::is_base_placeholder;

/// Resolve the dependency tree of `item`.
///
/// Versions recorded as the base placeholder are replaced by `base_version`
/// before lookup. The result always contains `item` itself.
pub fn resolve(item: &Item, universe: &Universe, base_version: &str) -> DependencyGraph {
    let mut path = Vec::new();
    resolve_item(item, universe, base_version, &mut path)
}

/// Resolve every item of the universe and merge the results.
///
/// Later results replace earlier entries for the same identity.
pub fn resolve_all(universe: &Universe, base_version: &str) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for item in universe.items() {
        graph.merge(resolve(item, universe, base_version));
    }

    tracing::debug!(
        "Resolved {} items ({} graph entries)",
        universe.len(),
        graph.len()
    );
    graph
}

fn resolve_item(
    item: &Item,
    universe: &Universe,
    base_version: &str,
    path: &mut Vec<ItemId>,
) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    graph.insert(item.id().clone(), Vec::new());

    path.push(item.id().clone());

    let declared = item
        .modules_dependencies()
        .iter()
        .map(|dep| ("module", dep))
        .chain(item.package_dependencies().iter().map(|dep| ("package", dep)));

    let mut deps = Vec::new();
    for (kind, (name, version)) in declared {
        let version = if is_base_placeholder(version) {
            base_version
        } else {
            version.as_str()
        };
        let dep_id = ItemId::new(name.as_str(), version);

        match universe.get(&dep_id) {
            Some(_) if path.contains(&dep_id) => {
                tracing::debug!(
                    "Dependency cycle: {} -> {}",
                    path.iter()
                        .map(ItemId::to_string)
                        .collect::<Vec<_>>()
                        .join(" -> "),
                    dep_id
                );
                deps.push(dep_id);
            }
            Some(dep) => {
                deps.push(dep_id);
                graph.merge(resolve_item(dep, universe, base_version, path));
            }
            None => {
                tracing::debug!(
                    "Could not find {} dependency: {} with version {} for item: {}.",
                    kind,
                    name,
                    version,
                    item
                );
                deps.push(dep_id);
            }
        }
    }

    path.pop();
    graph.insert(item.id().clone(), deps);
    graph
}
