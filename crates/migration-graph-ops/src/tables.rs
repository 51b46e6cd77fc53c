//! CSV adapters for the migration, coordinate and summary tables.
//!
//! Everything past this module works on already-parsed records; these helpers
//! only turn readers into typed rows.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

use migration_graph_core::{MigrationRecord, StateCoordinate, StateSummary};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::coordinates::CoordinateTable;
use crate::error::{OpsError, OpsResult};

fn read_records<T: DeserializeOwned, R: Read>(table: &'static str, reader: R) -> OpsResult<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| OpsError::csv(table, e))?;

    debug!(table, rows = rows.len(), "Parsed table");
    Ok(rows)
}

fn open_table(table: &'static str, path: &Path) -> OpsResult<std::fs::File> {
    if !path.exists() {
        return Err(OpsError::TableNotFound {
            table,
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::File::open(path)?)
}

/// Parse `origin,destination,count` rows.
pub fn read_migrations<R: Read>(reader: R) -> OpsResult<Vec<MigrationRecord>> {
    read_records("migration", reader)
}

/// Parse `name,latitude,longitude` rows.
pub fn read_coordinates<R: Read>(reader: R) -> OpsResult<CoordinateTable> {
    let rows: Vec<StateCoordinate> = read_records("coordinate", reader)?;
    Ok(CoordinateTable::from_records(rows))
}

/// Parse `name,total_inbound,total_outbound,narrative` rows.
pub fn read_summaries<R: Read>(reader: R) -> OpsResult<SummaryTable> {
    let rows: Vec<StateSummary> = read_records("summary", reader)?;
    Ok(SummaryTable::from_records(rows))
}

/// Load the migration table from a file.
pub fn load_migrations(path: &Path) -> OpsResult<Vec<MigrationRecord>> {
    read_migrations(open_table("migration", path)?)
}

/// Load the coordinate table from a file.
pub fn load_coordinates(path: &Path) -> OpsResult<CoordinateTable> {
    read_coordinates(open_table("coordinate", path)?)
}

/// Load the summary table from a file.
pub fn load_summaries(path: &Path) -> OpsResult<SummaryTable> {
    read_summaries(open_table("summary", path)?)
}

/// Per-state summaries keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    rows: HashMap<String, StateSummary>,
}

impl SummaryTable {
    /// Build from parsed rows. A repeated name replaces the earlier row.
    pub fn from_records(records: impl IntoIterator<Item = StateSummary>) -> Self {
        Self {
            rows: records
                .into_iter()
                .map(|row| (row.name.clone(), row))
                .collect(),
        }
    }

    /// Compute inbound/outbound totals straight from the migration table.
    ///
    /// Totals saturate at `u64::MAX`.
    pub fn derive(records: &[MigrationRecord]) -> Self {
        let mut totals: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
        for record in records {
            if record.origin_state == record.destination_state {
                continue;
            }
            let origin = totals.entry(&record.origin_state).or_default();
            origin.1 = origin.1.saturating_add(record.count);
            let destination = totals.entry(&record.destination_state).or_default();
            destination.0 = destination.0.saturating_add(record.count);
        }

        Self::from_records(totals.into_iter().map(|(name, (inbound, outbound))| {
            StateSummary {
                name: name.to_string(),
                total_inbound: inbound,
                total_outbound: outbound,
                narrative: String::new(),
            }
        }))
    }

    /// Look up a state's summary.
    pub fn get(&self, name: &str) -> Option<&StateSummary> {
        self.rows.get(name)
    }

    /// All rows sorted by name.
    pub fn rows(&self) -> Vec<&StateSummary> {
        let mut rows: Vec<_> = self.rows.values().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
