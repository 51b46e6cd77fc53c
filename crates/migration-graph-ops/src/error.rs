//! Error types for the operations layer.

use std::path::PathBuf;

use migration_graph_core::DomainError;
use thiserror::Error;

/// Result type for operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Errors that can occur during operations.
#[derive(Debug, Error)]
pub enum OpsError {
    /// A selection parameter failed validation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An edge handed to the graph builder references a node that was never resolved.
    #[error("Edge {from} -> {to} references unknown node '{missing}'")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },

    /// The node set handed to the graph builder repeats a name.
    #[error("Duplicate node '{0}' in node set")]
    DuplicateNode(String),

    /// A required input table is missing.
    #[error("Table '{table}' not found at {path}")]
    TableNotFound { table: &'static str, path: PathBuf },

    /// A tabular input could not be parsed.
    #[error("Failed to parse {table} table: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OpsError {
    /// Wrap a CSV error with the name of the table being read.
    pub fn csv(table: &'static str, source: csv::Error) -> Self {
        Self::Csv { table, source }
    }
}
