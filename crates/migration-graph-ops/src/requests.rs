//! Request DTOs for operations.
//!
//! A request carries every selection parameter for one recomputation, so
//! callers never rely on ambient state.

use migration_graph_core::{Direction, StateSelection, Threshold};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Request to build the migration network and its display table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRequest {
    /// State to anchor on, or every state.
    #[serde(default)]
    pub state: StateSelection,

    /// Flow direction relative to the anchor.
    #[serde(default)]
    pub direction: Direction,

    /// Edges kept per anchor.
    #[serde(default)]
    pub threshold: Threshold,

    /// Maximum rows in the display table.
    #[serde(default = "default_table_rows")]
    pub table_rows: usize,
}

fn default_table_rows() -> usize {
    20
}

impl Default for NetworkRequest {
    fn default() -> Self {
        Self {
            state: StateSelection::AllStates,
            direction: Direction::default(),
            threshold: Threshold::default(),
            table_rows: default_table_rows(),
        }
    }
}

impl NetworkRequest {
    /// Request seeded from configured defaults.
    pub fn from_config(config: &Config) -> Self {
        Self {
            state: StateSelection::AllStates,
            direction: config.direction,
            threshold: config.threshold,
            table_rows: config.table_rows,
        }
    }

    /// Anchor on a single state.
    pub fn for_state(mut self, state: impl Into<StateSelection>) -> Self {
        self.state = state.into();
        self
    }

    /// Set the flow direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the per-anchor edge budget.
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the display table cap.
    pub fn with_table_rows(mut self, rows: usize) -> Self {
        self.table_rows = rows;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let request = NetworkRequest::default()
            .for_state("Ohio")
            .with_direction(Direction::Incoming)
            .with_threshold(Threshold::new(9).unwrap())
            .with_table_rows(4);

        assert_eq!(request.state, StateSelection::state("Ohio"));
        assert_eq!(request.direction, Direction::Incoming);
        assert_eq!(request.threshold.get(), 9);
        assert_eq!(request.table_rows, 4);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let request: NetworkRequest =
            serde_json::from_str(r#"{"state": "Utah", "direction": "incoming"}"#).unwrap();
        assert_eq!(request.state, StateSelection::state("Utah"));
        assert_eq!(request.threshold.get(), 3);
        assert_eq!(request.table_rows, 20);
    }

    #[test]
    fn test_deserialize_rejects_bad_threshold() {
        assert!(serde_json::from_str::<NetworkRequest>(r#"{"threshold": 0}"#).is_err());
    }
}
