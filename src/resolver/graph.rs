//! DependencyGraph - item identity to the identities it directly depends on.
//!
//! Keys are kept in insertion order. Unresolved dependencies only ever show
//! up inside dependency lists, never as keys.

use std::collections::HashMap;

use indexmap::IndexMap;
use petgraph::algo::tarjan_scc;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::{ItemId, ItemKind, Universe};

/// Direct dependencies of every resolved item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: IndexMap<ItemId, Vec<ItemId>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        DependencyGraph::default()
    }

    /// Set the dependency list of `id`, replacing any previous list.
    pub fn insert(&mut self, id: ItemId, deps: Vec<ItemId>) {
        self.edges.insert(id, deps);
    }

    /// Merge `other` into this graph. Entries of `other` win.
    pub fn merge(&mut self, other: DependencyGraph) {
        self.edges.extend(other.edges);
    }

    /// Direct dependencies of `id`, if it was resolved.
    pub fn deps(&self, id: &ItemId) -> Option<&[ItemId]> {
        self.edges.get(id).map(Vec::as_slice)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.edges.contains_key(id)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &[ItemId])> {
        self.edges.iter().map(|(id, deps)| (id, deps.as_slice()))
    }

    /// Entries ordered by identity (name, then version).
    pub fn sorted(&self) -> Vec<(&ItemId, &[ItemId])> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Build a petgraph graph. Edge weights are the position of the
    /// dependency in its declaring item's list.
    pub fn to_petgraph(&self) -> DiGraph<ItemId, usize> {
        let mut graph = DiGraph::new();
        let mut nodes: HashMap<ItemId, NodeIndex> = HashMap::new();

        let mut node_for = |graph: &mut DiGraph<ItemId, usize>, id: &ItemId| -> NodeIndex {
            *nodes
                .entry(id.clone())
                .or_insert_with(|| graph.add_node(id.clone()))
        };

        for (id, deps) in &self.edges {
            let from = node_for(&mut graph, id);
            for (position, dep) in deps.iter().enumerate() {
                let to = node_for(&mut graph, dep);
                graph.add_edge(from, to, position);
            }
        }

        graph
    }

    /// Groups of identities that depend on each other in a cycle.
    ///
    /// A self-dependency is reported as a group of one.
    pub fn cycles(&self) -> Vec<Vec<ItemId>> {
        let graph = self.to_petgraph();

        let mut cycles: Vec<Vec<ItemId>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || graph.find_edge(scc[0], scc[0]).is_some()
            })
            .map(|scc| {
                let mut ids: Vec<ItemId> = scc.into_iter().map(|n| graph[n].clone()).collect();
                ids.sort();
                ids
            })
            .collect();

        cycles.sort();
        cycles
    }

    /// Render the graph in Graphviz DOT format.
    ///
    /// Nodes are filled by the kind of the matching universe item; nodes
    /// with no item in the universe are white.
    pub fn to_dot(&self, universe: &Universe) -> String {
        let graph = self.to_petgraph();

        let edge_attrs = |_, _| String::new();
        let node_attrs = |_, (_, id): (NodeIndex, &ItemId)| {
            let color = universe
                .get(id)
                .map(|item| kind_color(item.kind()))
                .unwrap_or("white");
            format!(
                "label = \"{}\" style = filled fillcolor = {}",
                id.label().replace('"', "\\\""),
                color
            )
        };

        let dot = Dot::with_attr_getters(
            &graph,
            &[Config::NodeNoLabel, Config::EdgeNoLabel],
            &edge_attrs,
            &node_attrs,
        );

        dot.to_string()
    }
}

fn kind_color(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::EpicsIoc => "blue",
        ItemKind::EpicsModule => "green",
        ItemKind::SystemPackage => "red",
        ItemKind::KernelDriver => "yellow",
    }
}

impl Serialize for DependencyGraph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // `name|version` keys keep the JSON flat and readable
        let mut map = serializer.serialize_map(Some(self.edges.len()))?;
        for (id, deps) in &self.edges {
            let deps: Vec<String> = deps.iter().map(ItemId::to_string).collect();
            map.serialize_entry(&id.to_string(), &deps)?;
        }
        map.end()
    }
}
