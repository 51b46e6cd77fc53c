//! Configuration for the operations layer.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use migration_graph_core::{Direction, Threshold};
use serde::{Deserialize, Serialize};

use crate::error::{OpsError, OpsResult};

/// File holding state-to-state migration counts.
pub const MIGRATION_FILE: &str = "state_migration.csv";
/// Optional file holding state coordinates.
pub const COORDINATES_FILE: &str = "state_coordinates.csv";
/// Optional file holding per-state summaries.
pub const SUMMARY_FILE: &str = "state_migration_summary.csv";

/// Configuration for migration-graph operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory containing the CSV tables.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Default top-N edges per anchor state.
    #[serde(default)]
    pub threshold: Threshold,

    /// Default flow direction.
    #[serde(default)]
    pub direction: Direction,

    /// Maximum rows in the display table.
    #[serde(default = "default_table_rows")]
    pub table_rows: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_table_rows() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            threshold: Threshold::default(),
            direction: Direction::default(),
            table_rows: default_table_rows(),
        }
    }
}

impl Config {
    /// Load configuration from disk with environment overrides.
    pub fn load() -> OpsResult<Self> {
        Self::load_file()?.with_env_overrides()
    }

    /// Load only what is persisted on disk, falling back to defaults.
    ///
    /// This is the base that `config set` and `config reset` edit; the
    /// `MG_*` overrides must never be written back.
    pub fn load_file() -> OpsResult<Self> {
        match Self::config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> OpsResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Apply `MG_*` environment variables on top of this configuration.
    pub fn with_env_overrides(mut self) -> OpsResult<Self> {
        for key in Self::KEYS {
            let var = format!("MG_{}", key.to_ascii_uppercase());
            if let Ok(value) = std::env::var(&var) {
                self.set(key, &value)
                    .map_err(|e| OpsError::Config(format!("{var}: {e}")))?;
            }
        }
        Ok(self)
    }

    /// Save configuration to disk.
    pub fn save(&self) -> OpsResult<()> {
        if let Some(path) = Self::config_file_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&path, contents)?;
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "migration-graph", "mg")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Keys accepted by [`Config::get`] and [`Config::set`].
    pub const KEYS: [&'static str; 4] = ["data_dir", "threshold", "direction", "table_rows"];

    /// Path of the migration table inside `data_dir`.
    pub fn migration_path(&self) -> PathBuf {
        self.data_dir.join(MIGRATION_FILE)
    }

    /// Path of the coordinate table inside `data_dir`.
    pub fn coordinates_path(&self) -> PathBuf {
        self.data_dir.join(COORDINATES_FILE)
    }

    /// Path of the summary table inside `data_dir`.
    pub fn summary_path(&self) -> PathBuf {
        self.data_dir.join(SUMMARY_FILE)
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_dir" => Some(self.data_dir.display().to_string()),
            "threshold" => Some(self.threshold.to_string()),
            "direction" => Some(self.direction.to_string()),
            "table_rows" => Some(self.table_rows.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key.
    pub fn set(&mut self, key: &str, value: &str) -> OpsResult<()> {
        match key {
            "data_dir" => {
                self.data_dir = PathBuf::from(value);
            }
            "threshold" => {
                self.threshold = value.parse()?;
            }
            "direction" => {
                self.direction = value.parse()?;
            }
            "table_rows" => {
                self.table_rows = value
                    .parse()
                    .map_err(|_| OpsError::Config(format!("Invalid number: {}", value)))?;
            }
            _ => {
                return Err(OpsError::Config(format!("Unknown config key: {}", key)));
            }
        }
        Ok(())
    }
}
