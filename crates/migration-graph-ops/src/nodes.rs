//! Node resolution: attach coordinates and aggregate flow to every endpoint.

use std::collections::{BTreeMap, BTreeSet};

use migration_graph_core::{Direction, Edge, Node};
use tracing::warn;

use crate::coordinates::CoordinateTable;

/// Nodes that could be placed, plus the names that could not.
///
/// Only [`compute_nodes`] builds this, which keeps `nodes` sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedNodes {
    nodes: Vec<Node>,
    unplotted: Vec<String>,
}

impl ResolvedNodes {
    /// Plottable nodes sorted by name.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Endpoints with no coordinate entry, sorted by name.
    pub fn unplotted(&self) -> &[String] {
        &self.unplotted
    }

    /// Split into `(nodes, unplotted)`.
    pub fn into_parts(self) -> (Vec<Node>, Vec<String>) {
        (self.nodes, self.unplotted)
    }

    /// Whether any endpoint had to be dropped.
    pub fn has_missing(&self) -> bool {
        !self.unplotted.is_empty()
    }

    /// Whether `name` resolved to a node.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes
            .binary_search_by(|n| n.name.as_str().cmp(name))
            .is_ok()
    }

    /// Edges whose endpoints both resolved, in their original order.
    pub fn plottable_edges(&self, edges: &[Edge]) -> Vec<Edge> {
        edges
            .iter()
            .filter(|e| self.contains(&e.source) && self.contains(&e.target))
            .cloned()
            .collect()
    }
}

#[derive(Default)]
struct Tally {
    value: u64,
    anchor: bool,
}

/// Build the node set for a sequence of selected edges.
///
/// Both endpoints of every edge become nodes; a state appearing in several
/// edges is aggregated into one entry. Endpoints missing from `coordinates`
/// are reported in `unplotted` instead of failing the request.
pub fn compute_nodes(coordinates: &CoordinateTable, edges: &[Edge], direction: Direction) -> ResolvedNodes {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

    for edge in edges {
        let anchor = direction.anchor_of(edge);
        let counterpart = direction.counterpart_of(edge);

        let entry = tallies.entry(anchor).or_default();
        entry.value = entry.value.saturating_add(edge.value);
        entry.anchor = true;

        let entry = tallies.entry(counterpart).or_default();
        entry.value = entry.value.saturating_add(edge.value);
    }

    let mut nodes = Vec::with_capacity(tallies.len());
    let mut unplotted = BTreeSet::new();

    for (name, tally) in tallies {
        match coordinates.get(name) {
            Some(coord) => nodes.push(Node {
                name: name.to_string(),
                latitude: coord.latitude,
                longitude: coord.longitude,
                aggregate_value: tally.value,
                anchor: tally.anchor,
            }),
            None => {
                warn!(state = %name, "No coordinates for state; dropping from network");
                unplotted.insert(name.to_string());
            }
        }
    }

    ResolvedNodes {
        nodes,
        unplotted: unplotted.into_iter().collect(),
    }
}
