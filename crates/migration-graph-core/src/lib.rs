//! Core domain types shared across the migration-graph workspace.

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Selector text meaning "every state is its own anchor".
pub const ALL_STATES_TITLE: &str = "All States";

/// Smallest accepted per-anchor edge budget.
pub const MIN_THRESHOLD: u8 = 1;

/// Largest accepted per-anchor edge budget.
pub const MAX_THRESHOLD: u8 = 25;

/// Errors raised while constructing validated domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Threshold outside of `MIN_THRESHOLD..=MAX_THRESHOLD`.
    #[error("threshold must be between 1 and 25, got {0}")]
    InvalidThreshold(i64),

    /// Threshold text that is not an integer.
    #[error("threshold must be an integer, got '{0}'")]
    UnparsableThreshold(String),

    /// Direction text matched neither a canonical name nor a legacy alias.
    #[error("unknown direction '{0}' (expected outgoing, incoming, lending or renting)")]
    InvalidDirection(String),
}

// =============================================================================
// Selection Parameters
// =============================================================================

/// Which way migration flows relative to the anchor state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// People leaving the anchor state.
    #[default]
    Outgoing,
    /// People arriving in the anchor state.
    Incoming,
}

impl Direction {
    /// Display label for the canonical direction.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Outgoing => "Outgoing",
            Direction::Incoming => "Incoming",
        }
    }

    /// Label used by the rental front-end ("Lending" leaves, "Renting" arrives).
    pub fn legacy_label(&self) -> &'static str {
        match self {
            Direction::Outgoing => "Lending",
            Direction::Incoming => "Renting",
        }
    }

    /// The anchor endpoint of an edge under this direction.
    pub fn anchor_of<'a>(&self, edge: &'a Edge) -> &'a str {
        match self {
            Direction::Outgoing => &edge.source,
            Direction::Incoming => &edge.target,
        }
    }

    /// The non-anchor endpoint of an edge under this direction.
    pub fn counterpart_of<'a>(&self, edge: &'a Edge) -> &'a str {
        match self {
            Direction::Outgoing => &edge.target,
            Direction::Incoming => &edge.source,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "outgoing" | "out" | "lending" => Ok(Direction::Outgoing),
            "incoming" | "in" | "renting" => Ok(Direction::Incoming),
            _ => Err(DomainError::InvalidDirection(s.to_string())),
        }
    }
}

/// A single state or the "All States" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum StateSelection {
    /// Every state present in the table is ranked as its own anchor.
    #[default]
    AllStates,
    /// Only the named state is ranked.
    State(String),
}

impl StateSelection {
    /// Selection for one named state.
    pub fn state(name: impl Into<String>) -> Self {
        StateSelection::State(name.into())
    }

    /// The selected state name, if a specific state was chosen.
    pub fn name(&self) -> Option<&str> {
        match self {
            StateSelection::AllStates => None,
            StateSelection::State(name) => Some(name),
        }
    }
}

impl fmt::Display for StateSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateSelection::AllStates => f.write_str(ALL_STATES_TITLE),
            StateSelection::State(name) => f.write_str(name),
        }
    }
}

impl From<&str> for StateSelection {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed == ALL_STATES_TITLE {
            StateSelection::AllStates
        } else {
            StateSelection::State(trimmed.to_string())
        }
    }
}

impl From<String> for StateSelection {
    fn from(s: String) -> Self {
        StateSelection::from(s.as_str())
    }
}

impl From<StateSelection> for String {
    fn from(selection: StateSelection) -> Self {
        selection.to_string()
    }
}

/// Maximum number of counterpart edges retained per anchor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Threshold(u8);

impl Threshold {
    /// Validate a raw threshold.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if (MIN_THRESHOLD as i64..=MAX_THRESHOLD as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::InvalidThreshold(value))
        }
    }

    /// The threshold as a count.
    pub fn get(&self) -> usize {
        self.0 as usize
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<i64> for Threshold {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Threshold::new(value)
    }
}

impl From<Threshold> for u8 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Threshold {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::UnparsableThreshold(s.to_string()))?;
        Threshold::new(value)
    }
}

// =============================================================================
// Tabular Records
// =============================================================================

/// One row of the state-to-state migration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    /// State people moved out of.
    #[serde(alias = "origin")]
    pub origin_state: String,
    /// State people moved into.
    #[serde(alias = "destination")]
    pub destination_state: String,
    /// Number of people who made the move.
    pub count: u64,
}

impl MigrationRecord {
    /// Convenience constructor.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, count: u64) -> Self {
        Self {
            origin_state: origin.into(),
            destination_state: destination.into(),
            count,
        }
    }
}

/// Placement of a state on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateCoordinate {
    /// State name, unique within a coordinate table.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl StateCoordinate {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Reference totals and blurb for a state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSummary {
    /// State name.
    pub name: String,
    /// People who moved into the state.
    pub total_inbound: u64,
    /// People who moved out of the state.
    pub total_outbound: u64,
    /// Free-form description shown next to the graph.
    #[serde(default)]
    pub narrative: String,
}

impl StateSummary {
    /// Inbound minus outbound.
    pub fn net(&self) -> i64 {
        let net = self.total_inbound as i128 - self.total_outbound as i128;
        net.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }
}

// =============================================================================
// Network Types
// =============================================================================

/// A selected, directed migration flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Origin state.
    pub source: String,
    /// Destination state.
    pub target: String,
    /// Number of people.
    pub value: u64,
    /// Share of the anchor's total in the selected direction, 0..=100.
    pub percentage: f64,
}

impl Edge {
    /// Convenience constructor.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        value: u64,
        percentage: f64,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
            percentage,
        }
    }

    /// Whether `name` is either endpoint.
    pub fn touches(&self, name: &str) -> bool {
        self.source == name || self.target == name
    }
}

/// A plottable state in the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// State name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Sum of `value` over incident selected edges.
    pub aggregate_value: u64,
    /// Whether this node anchors at least one edge.
    #[serde(default)]
    pub anchor: bool,
}

/// Directed, weighted migration network ready for a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrationGraph {
    /// Direction the edges were selected in.
    pub direction: Direction,
    /// Nodes, unique by name.
    pub nodes: Vec<Node>,
    /// Edges in selection order.
    pub edges: Vec<Edge>,
}

impl MigrationGraph {
    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Look up a node by state name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Total people moved across all edges.
    pub fn total_value(&self) -> u64 {
        self.edges
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.value))
    }

    /// Convert to a petgraph `StableDiGraph` weighted by edge.
    /// Returns the graph and a mapping from state name to `NodeIndex`.
    pub fn to_petgraph(&self) -> (StableDiGraph<Node, Edge>, HashMap<String, NodeIndex>) {
        let mut graph = StableDiGraph::new();
        let mut name_to_index = HashMap::new();

        for node in &self.nodes {
            let idx = graph.add_node(node.clone());
            name_to_index.insert(node.name.clone(), idx);
        }

        for edge in &self.edges {
            if let (Some(&from), Some(&to)) = (
                name_to_index.get(&edge.source),
                name_to_index.get(&edge.target),
            ) {
                graph.add_edge(from, to, edge.clone());
            }
        }

        (graph, name_to_index)
    }
}
