//! OpsContext - runs the per-request migration pipeline.
//!
//! The context owns the immutable input tables. Every call to
//! [`OpsContext::network`] rebuilds the network from scratch.

use migration_graph_core::{MigrationRecord, StateSelection, ALL_STATES_TITLE};
use tracing::{debug, info};

use crate::config::Config;
use crate::coordinates::CoordinateTable;
use crate::display::{table_edges, table_headers};
use crate::edges::compute_edges;
use crate::error::OpsResult;
use crate::network::build_network;
use crate::nodes::compute_nodes;
use crate::requests::NetworkRequest;
use crate::responses::NetworkResponse;
use crate::summary::{display_state, display_state_summary};
use crate::tables::{load_coordinates, load_migrations, load_summaries, SummaryTable};

/// The three parsed input tables.
#[derive(Debug, Clone, Default)]
pub struct MigrationDataset {
    /// Pairwise migration counts.
    pub migrations: Vec<MigrationRecord>,
    /// Node placement.
    pub coordinates: CoordinateTable,
    /// Per-state descriptor data.
    pub summaries: SummaryTable,
}

impl MigrationDataset {
    /// Dataset from a migration table, using built-in coordinates and derived summaries.
    pub fn from_migrations(migrations: Vec<MigrationRecord>) -> Self {
        let summaries = SummaryTable::derive(&migrations);
        Self {
            migrations,
            coordinates: CoordinateTable::us_states(),
            summaries,
        }
    }

    /// Replace the coordinate table.
    pub fn with_coordinates(mut self, coordinates: CoordinateTable) -> Self {
        self.coordinates = coordinates;
        self
    }

    /// Replace the summary table.
    pub fn with_summaries(mut self, summaries: SummaryTable) -> Self {
        self.summaries = summaries;
        self
    }

    /// Load the tables from `config.data_dir`.
    ///
    /// The migration table is required; coordinates fall back to the
    /// built-in US table and summaries to totals derived from migrations.
    pub fn load(config: &Config) -> OpsResult<Self> {
        let migrations = load_migrations(&config.migration_path())?;
        let mut dataset = Self::from_migrations(migrations);

        let coordinates_path = config.coordinates_path();
        if coordinates_path.exists() {
            dataset = dataset.with_coordinates(load_coordinates(&coordinates_path)?);
        } else {
            debug!(path = %coordinates_path.display(), "Using built-in state coordinates");
        }

        let summary_path = config.summary_path();
        if summary_path.exists() {
            dataset = dataset.with_summaries(load_summaries(&summary_path)?);
        } else {
            debug!(path = %summary_path.display(), "Deriving state summaries from migrations");
        }

        info!(
            migrations = dataset.migrations.len(),
            states = dataset.coordinates.len(),
            "Loaded migration dataset"
        );
        Ok(dataset)
    }
}

/// The main operations context.
#[derive(Debug, Clone)]
pub struct OpsContext {
    /// Configuration for operations.
    pub config: Config,
    dataset: MigrationDataset,
}

impl OpsContext {
    /// Create a context over an already-loaded dataset.
    pub fn new(config: Config, dataset: MigrationDataset) -> Self {
        Self { config, dataset }
    }

    /// Create a context by loading the dataset named in `config`.
    pub fn load(config: Config) -> OpsResult<Self> {
        let dataset = MigrationDataset::load(&config)?;
        Ok(Self::new(config, dataset))
    }

    /// The input tables.
    pub fn dataset(&self) -> &MigrationDataset {
        &self.dataset
    }

    /// Request seeded from the configured defaults.
    pub fn default_request(&self) -> NetworkRequest {
        NetworkRequest::from_config(&self.config)
    }

    /// Selectable states, with the "All States" sentinel first.
    pub fn states(&self) -> Vec<String> {
        std::iter::once(ALL_STATES_TITLE)
            .chain(self.dataset.coordinates.state_names())
            .map(str::to_string)
            .collect()
    }

    /// Build the network, display table and descriptor text for one request.
    pub fn network(&self, request: &NetworkRequest) -> OpsResult<NetworkResponse> {
        let NetworkRequest {
            state,
            direction,
            threshold,
            table_rows,
        } = request;

        let edges = compute_edges(&self.dataset.migrations, *threshold, state, *direction);
        if edges.is_empty() {
            if let StateSelection::State(name) = state {
                debug!(state = %name, "No migration edges for state");
            }
        }

        let resolved = compute_nodes(&self.dataset.coordinates, &edges, *direction);
        let plottable = resolved.plottable_edges(&edges);
        let dropped_edges = edges.len() - plottable.len();
        if dropped_edges > 0 {
            // compute_nodes already warned once per missing state
            debug!(
                dropped = dropped_edges,
                unplotted = ?resolved.unplotted(),
                "Some selected edges cannot be plotted"
            );
        }

        let table = table_edges(&edges, *direction, *table_rows);
        let selected_edges = edges.len();
        let (nodes, unplotted) = resolved.into_parts();
        let graph = build_network(nodes, plottable, *direction)?;

        info!(
            state = %state,
            direction = %direction,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Graph created"
        );

        Ok(NetworkResponse {
            state: state.clone(),
            direction: *direction,
            graph,
            headers: table_headers(*direction).map(str::to_string).to_vec(),
            table,
            title: display_state(state),
            summary: display_state_summary(state, &self.dataset.summaries),
            unplotted,
            selected_edges,
            dropped_edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration_graph_core::{Direction, StateCoordinate, Threshold};

    fn dataset() -> MigrationDataset {
        MigrationDataset::from_migrations(vec![
            MigrationRecord::new("California", "New York", 100),
            MigrationRecord::new("California", "Texas", 50),
            MigrationRecord::new("California", "Florida", 10),
            MigrationRecord::new("Texas", "California", 40),
            MigrationRecord::new("Texas", "Atlantis", 60),
        ])
    }

    fn ctx() -> OpsContext {
        OpsContext::new(Config::default(), dataset())
    }

    #[test]
    fn test_single_state_pipeline() {
        let request = NetworkRequest::default()
            .for_state("California")
            .with_threshold(Threshold::new(2).unwrap());
        let response = ctx().network(&request).unwrap();

        assert_eq!(response.graph.edge_count(), 2);
        assert_eq!(response.graph.node_count(), 3);
        assert_eq!(response.table.len(), 2);
        assert_eq!(response.table[0].to, "New York");
        assert_eq!(response.table[0].percent, "62.50%");
        assert_eq!(response.title, "California Migration");
        assert!(response.summary.starts_with("California gained 40"));
        assert!(!response.has_warnings());
        assert_eq!(response.headers[0], "State");
    }

    #[test]
    fn test_graph_and_table_share_order() {
        let request = NetworkRequest::default().with_threshold(Threshold::new(25).unwrap());
        let response = ctx().network(&request).unwrap();

        let graph_pairs: Vec<_> = response
            .graph
            .edges
            .iter()
            .map(|e| (e.source.clone(), e.target.clone()))
            .collect();
        let table_pairs: Vec<_> = response
            .table
            .iter()
            .filter(|r| r.to != "Atlantis")
            .map(|r| (r.from.clone(), r.to.clone()))
            .collect();
        assert_eq!(graph_pairs, table_pairs);
    }

    #[test]
    fn test_missing_coordinates_are_a_warning() {
        let request = NetworkRequest::default().for_state("Texas");
        let response = ctx().network(&request).unwrap();

        assert_eq!(response.unplotted, ["Atlantis"]);
        assert_eq!(response.selected_edges, 2);
        assert_eq!(response.dropped_edges, 1);
        assert_eq!(response.graph.edge_count(), 1);
        assert_eq!(response.table.len(), 2);
        assert!(response.has_warnings());
        assert!(!response.is_empty());
    }

    #[test]
    fn test_unknown_state_is_empty_not_error() {
        let request = NetworkRequest::default().for_state("Narnia");
        let response = ctx().network(&request).unwrap();

        assert!(response.is_empty());
        assert!(response.graph.is_empty());
        assert!(!response.has_warnings());
        assert_eq!(response.summary, "No migration data available for Narnia.");
    }

    #[test]
    fn test_incoming_direction() {
        let request = NetworkRequest::default()
            .for_state("California")
            .with_direction(Direction::Incoming);
        let response = ctx().network(&request).unwrap();

        assert_eq!(response.graph.edge_count(), 1);
        assert_eq!(response.table[0].from, "Texas");
        assert_eq!(response.table[0].to, "California");
        assert_eq!(response.table[0].percent, "100.00%");
        assert_eq!(response.headers[1], "State");
    }

    #[test]
    fn test_states_lists_sentinel_first() {
        let dataset = dataset().with_coordinates(CoordinateTable::from_records([
            StateCoordinate::new("Texas", 31.0, -97.0),
        ]));
        let ctx = OpsContext::new(Config::default(), dataset);
        assert_eq!(ctx.states(), ["All States", "Texas"]);
    }

    #[test]
    fn test_summary_table_replaces_derived_totals() {
        let dataset = dataset().with_summaries(SummaryTable::from_records([
            migration_graph_core::StateSummary {
                name: "California".into(),
                total_inbound: 7,
                total_outbound: 3,
                narrative: "Coastal draw.".into(),
            },
        ]));
        let ctx = OpsContext::new(Config::default(), dataset);

        let response = ctx.network(&NetworkRequest::default().for_state("California")).unwrap();
        assert!(response.summary.starts_with("California gained 7 residents"));
        assert!(response.summary.ends_with("Coastal draw."));
    }

    #[test]
    fn test_load_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("state_migration.csv"),
            "origin,destination,count\nOhio,Utah,5\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("state_coordinates.csv"),
            "name,latitude,longitude\nOhio,40.0,-82.0\nUtah,40.0,-111.0\n",
        )
        .unwrap();

        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let ctx = OpsContext::load(config).unwrap();
        assert_eq!(ctx.dataset().coordinates.len(), 2);
        assert_eq!(ctx.dataset().summaries.get("Utah").unwrap().total_inbound, 5);

        let response = ctx.network(&ctx.default_request()).unwrap();
        assert_eq!(response.graph.edge_count(), 1);
    }
}
