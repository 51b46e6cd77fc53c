//! Response DTOs for operations.

use migration_graph_core::{Direction, MigrationGraph, StateSelection};
use serde::{Deserialize, Serialize};

use crate::display::TableRow;

/// Everything a front-end needs to draw one migration view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkResponse {
    /// Selection the response was computed for.
    pub state: StateSelection,

    /// Direction the response was computed for.
    pub direction: Direction,

    /// Plottable network.
    pub graph: MigrationGraph,

    /// Column labels for `table`.
    pub headers: Vec<String>,

    /// Display rows in selection order, capped.
    pub table: Vec<TableRow>,

    /// Header text.
    pub title: String,

    /// Descriptor text.
    pub summary: String,

    /// States that were selected but had no coordinates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unplotted: Vec<String>,

    /// Edges chosen by selection, plottable or not.
    pub selected_edges: usize,

    /// Selected edges left out of `graph` because an endpoint is unplotted.
    #[serde(default)]
    pub dropped_edges: usize,
}

impl NetworkResponse {
    /// Whether the selection produced no edges at all.
    pub fn is_empty(&self) -> bool {
        self.selected_edges == 0
    }

    /// Whether some selected flows could not be plotted.
    pub fn has_warnings(&self) -> bool {
        !self.unplotted.is_empty()
    }
}
