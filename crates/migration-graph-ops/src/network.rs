//! Network assembly from already-resolved nodes and edges.

use std::collections::HashSet;

use migration_graph_core::{Direction, Edge, MigrationGraph, Node};
use tracing::{debug, error};

use crate::error::{OpsError, OpsResult};

/// Assemble a directed weighted graph.
///
/// No filtering happens here: every edge must reference nodes present in
/// `nodes`, otherwise the upstream stages disagree and the call fails.
/// Edge order is kept as given.
pub fn build_network(nodes: Vec<Node>, edges: Vec<Edge>, direction: Direction) -> OpsResult<MigrationGraph> {
    let mut names: HashSet<&str> = HashSet::with_capacity(nodes.len());
    for node in &nodes {
        if !names.insert(node.name.as_str()) {
            error!(state = %node.name, "Duplicate node handed to graph builder");
            return Err(OpsError::DuplicateNode(node.name.clone()));
        }
    }

    for edge in &edges {
        let missing = [&edge.source, &edge.target]
            .into_iter()
            .find(|name| !names.contains(name.as_str()));

        if let Some(missing) = missing {
            error!(
                from = %edge.source,
                to = %edge.target,
                missing = %missing,
                "Edge references node outside the node set"
            );
            return Err(OpsError::DanglingEdge {
                from: edge.source.clone(),
                to: edge.target.clone(),
                missing: missing.clone(),
            });
        }
    }

    debug!(nodes = nodes.len(), edges = edges.len(), "Network built");

    Ok(MigrationGraph {
        direction,
        nodes,
        edges,
    })
}
