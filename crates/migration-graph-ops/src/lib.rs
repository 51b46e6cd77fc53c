//! Migration-Graph Operations Layer
//!
//! Typed operations that turn a state-to-state migration table into a
//! thresholded, directed network plus display-ready text and rows. The CLI
//! and any other front-end go through this crate.
//!
//! ## Pipeline
//!
//! 1. [`compute_edges`] ranks counterparts per anchor state and keeps the top N.
//! 2. [`compute_nodes`] places every endpoint using a [`CoordinateTable`].
//! 3. [`build_network`] assembles the plottable nodes and edges.
//! 4. [`table_edges`] flattens the selection into display rows.
//! 5. [`display_state`] / [`display_state_summary`] provide header text.
//!
//! [`OpsContext::network`] runs all of the above for one [`NetworkRequest`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use migration_graph_ops::{Config, NetworkRequest, OpsContext};
//!
//! fn main() -> migration_graph_ops::OpsResult<()> {
//!     let ctx = OpsContext::load(Config::load()?)?;
//!     let request = NetworkRequest::default().for_state("Texas");
//!     let response = ctx.network(&request)?;
//!
//!     println!("{} edges", response.graph.edge_count());
//!     Ok(())
//! }
//! ```

mod config;
mod context;
mod coordinates;
mod display;
mod edges;
mod error;
mod network;
mod nodes;
mod requests;
mod responses;
mod summary;
mod tables;

// Re-export public API
pub use config::{Config, COORDINATES_FILE, MIGRATION_FILE, SUMMARY_FILE};
pub use context::{MigrationDataset, OpsContext};
pub use coordinates::CoordinateTable;
pub use display::{format_percent, render_text_table, table_edges, table_headers, TableRow};
pub use edges::compute_edges;
pub use error::{OpsError, OpsResult};
pub use network::build_network;
pub use nodes::{compute_nodes, ResolvedNodes};
pub use requests::NetworkRequest;
pub use responses::NetworkResponse;
pub use summary::{display_state, display_state_summary, no_data_message};
pub use tables::{
    load_coordinates, load_migrations, load_summaries, read_coordinates, read_migrations,
    read_summaries, SummaryTable,
};
