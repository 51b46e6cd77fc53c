//! Integration tests for the mg CLI.
//!
//! Run with: `cargo test --package migration-graph-cli --test cli_integration`

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// An mg command with an isolated config home and no MG_* variables.
fn mg_command(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mg"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("MG_DATA_DIR")
        .env_remove("MG_THRESHOLD")
        .env_remove("MG_DIRECTION")
        .env_remove("MG_TABLE_ROWS")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to run mg against a data directory with an isolated config home.
fn run_mg(home: &Path, data_dir: &Path, args: &[&str]) -> Output {
    mg_command(home)
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .output()
        .expect("Failed to execute mg command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Create a small migration dataset using built-in coordinates.
fn create_dataset(dir: &Path) {
    fs::write(
        dir.join("state_migration.csv"),
        "origin,destination,count\n\
         California,New York,100\n\
         California,Texas,50\n\
         California,Florida,10\n\
         Texas,California,30\n\
         Texas,Florida,40\n\
         New York,Florida,70\n",
    )
    .unwrap();
}

fn setup() -> (TempDir, TempDir) {
    let home = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    create_dataset(data.path());
    (home, data)
}

#[test]
fn test_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_mg"))
        .arg("--help")
        .output()
        .expect("Failed to execute mg command");
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("network"));
    assert!(text.contains("summary"));
}

#[test]
fn test_network_json_single_state() {
    let (home, data) = setup();
    let output = run_mg(
        home.path(),
        data.path(),
        &["network", "--state", "California", "-n", "2", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let edges = json["graph"]["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0]["target"], "New York");
    assert_eq!(edges[0]["percentage"], 62.5);
    assert_eq!(edges[1]["percentage"], 31.25);
    assert_eq!(json["table"][0]["Percent"], "62.50%");
    assert_eq!(json["title"], "California Migration");
}

#[test]
fn test_network_table_default_command() {
    let (home, data) = setup();
    let output = run_mg(home.path(), data.path(), &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.starts_with("All States"));
    assert!(text.contains("Destination"));
    assert!(text.contains("62.50%"));
}

#[test]
fn test_table_incoming_with_legacy_label() {
    let (home, data) = setup();
    let output = run_mg(
        home.path(),
        data.path(),
        &["table", "--state", "Florida", "--direction", "Renting", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["From"], "New York");
    assert_eq!(rows[0]["To"], "Florida");
}

#[test]
fn test_table_rows_cap() {
    let (home, data) = setup();
    let output = run_mg(
        home.path(),
        data.path(),
        &["table", "-n", "25", "--rows", "2", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
}

#[test]
fn test_unknown_state_is_not_an_error() {
    let (home, data) = setup();
    let output = run_mg(home.path(), data.path(), &["network", "--state", "Atlantis"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("No migration data available for Atlantis."));
    assert!(text.contains("No migration flows found for Atlantis."));
}

#[test]
fn test_invalid_threshold_fails() {
    let (home, data) = setup();
    let output = run_mg(home.path(), data.path(), &["network", "-n", "30"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("threshold must be between 1 and 25"));
}

#[test]
fn test_missing_migration_table_fails() {
    let home = TempDir::new().unwrap();
    let empty = TempDir::new().unwrap();
    let output = run_mg(home.path(), empty.path(), &["network"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load migration data"));
}

#[test]
fn test_unplotted_states_are_reported() {
    let (home, data) = setup();
    fs::write(
        data.path().join("state_coordinates.csv"),
        "name,latitude,longitude\nCalifornia,36.1,-119.7\nNew York,42.2,-74.9\n",
    )
    .unwrap();

    let output = run_mg(
        home.path(),
        data.path(),
        &["network", "--state", "California", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["graph"]["edges"].as_array().unwrap().len(), 1);
    assert_eq!(json["selected_edges"], 3);
    assert_eq!(json["dropped_edges"], 2);
    assert_eq!(json["unplotted"], serde_json::json!(["Florida", "Texas"]));
}

#[test]
fn test_summary_from_file() {
    let (home, data) = setup();
    fs::write(
        data.path().join("state_migration_summary.csv"),
        "name,total_inbound,total_outbound,narrative\nTexas,500,300,Strong job market.\n",
    )
    .unwrap();

    let output = run_mg(home.path(), data.path(), &["summary", "Texas"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Texas Migration"));
    assert!(text.contains("Strong job market."));
}

#[test]
fn test_states_lists_sentinel_first() {
    let (home, data) = setup();
    let output = run_mg(home.path(), data.path(), &["states"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "All States");
    assert_eq!(lines.len(), 52);
}

#[test]
fn test_config_set_and_get() {
    let (home, data) = setup();
    let output = run_mg(home.path(), data.path(), &["config", "set", "threshold", "7"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = run_mg(home.path(), data.path(), &["config", "get", "threshold"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "7");

    let output = run_mg(home.path(), data.path(), &["config", "get", "color"]);
    assert!(!output.status.success());
}

#[test]
fn test_config_set_does_not_persist_overrides() {
    let (home, data) = setup();
    let output = mg_command(home.path())
        .env("MG_TABLE_ROWS", "3")
        .env("MG_DIRECTION", "incoming")
        .arg("--data-dir")
        .arg(data.path())
        .args(["config", "set", "threshold", "7"])
        .output()
        .expect("Failed to execute mg command");
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let saved = fs::read_to_string(home.path().join(".config/mg/config.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved["threshold"], 7);
    assert_eq!(saved["data_dir"], "data");
    assert_eq!(saved["table_rows"], 20);
    assert_eq!(saved["direction"], "outgoing");

    // Overrides still apply at runtime.
    let output = mg_command(home.path())
        .env("MG_TABLE_ROWS", "3")
        .args(["config", "get", "table_rows"])
        .output()
        .expect("Failed to execute mg command");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "3");
}
