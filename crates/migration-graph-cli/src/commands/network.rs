//! Network, table and summary commands.
//!
//! Each invocation builds a fresh [`NetworkRequest`] from CLI flags layered
//! over the configured defaults and runs it through the ops pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use migration_graph_core::{Direction, StateSelection, Threshold};
use migration_graph_ops::{
    display_state, display_state_summary, render_text_table, NetworkRequest, NetworkResponse,
    OpsContext,
};

use super::OutputFormat;

/// Layer CLI selection flags over the configured defaults.
pub fn build_request(
    ctx: &OpsContext,
    state: Option<&str>,
    direction: Option<&str>,
    threshold: Option<&str>,
    rows: Option<usize>,
) -> Result<NetworkRequest> {
    let mut request = ctx.default_request();

    if let Some(state) = state {
        request = request.for_state(state);
    }
    if let Some(direction) = direction {
        let direction: Direction = direction.parse()?;
        request = request.with_direction(direction);
    }
    if let Some(threshold) = threshold {
        let threshold: Threshold = threshold.parse()?;
        request = request.with_threshold(threshold);
    }
    if let Some(rows) = rows {
        request = request.with_table_rows(rows);
    }

    Ok(request)
}

fn report_warnings(response: &NetworkResponse) {
    if response.has_warnings() {
        warn!(
            states = ?response.unplotted,
            dropped = response.dropped_edges,
            "Selected flows without coordinates were left off the map"
        );
    }
}

/// Execute the network command.
pub fn execute(
    ctx: &OpsContext,
    request: &NetworkRequest,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<NetworkResponse> {
    let response = ctx.network(request)?;
    report_warnings(&response);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Table => {
            println!("{}", response.title);
            println!("{:─<50}", "");
            println!("{}", response.summary);
            println!();

            if response.is_empty() {
                println!("No migration flows found for {}.", response.state);
            } else {
                println!(
                    "Network: {} states, {} flows ({})",
                    response.graph.node_count(),
                    response.graph.edge_count(),
                    response.direction
                );
                if response.has_warnings() {
                    println!(
                        "Not plotted: {} ({} flows)",
                        response.unplotted.join(", "),
                        response.dropped_edges
                    );
                }
                println!();
                print!("{}", render_text_table(&response.table, response.direction));
            }
        }
    }

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&response)?;
        std::fs::write(&output_path, json)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        info!(path = %output_path.display(), "Saved network");
    }

    Ok(response)
}

/// Execute the table command.
pub fn table(ctx: &OpsContext, request: &NetworkRequest, format: OutputFormat) -> Result<()> {
    let response = ctx.network(request)?;
    report_warnings(&response);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response.table)?),
        OutputFormat::Table => print!("{}", render_text_table(&response.table, response.direction)),
    }
    Ok(())
}

/// Execute the summary command.
pub fn summary(ctx: &OpsContext, state: Option<&str>) {
    let selection = state.map(StateSelection::from).unwrap_or_default();
    println!("{}", display_state(&selection));
    println!("{}", display_state_summary(&selection, &ctx.dataset().summaries));
}
