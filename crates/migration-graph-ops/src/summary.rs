//! Header and descriptor text shown alongside the network.

use std::cmp::Reverse;

use migration_graph_core::{StateSelection, StateSummary, ALL_STATES_TITLE};

use crate::tables::SummaryTable;

/// Header text for the current selection.
pub fn display_state(state: &StateSelection) -> String {
    match state {
        StateSelection::AllStates => ALL_STATES_TITLE.to_string(),
        StateSelection::State(name) => format!("{name} Migration"),
    }
}

/// Message shown when a state has no summary row.
pub fn no_data_message(state: &str) -> String {
    format!("No migration data available for {state}.")
}

fn describe(row: &StateSummary) -> String {
    let net = row.net();
    let trend = match net {
        n if n > 0 => format!("a net gain of {n}"),
        n if n < 0 => format!("a net loss of {}", n.unsigned_abs()),
        _ => "no net change".to_string(),
    };

    let mut text = format!(
        "{} gained {} residents from other states and lost {}, {}.",
        row.name, row.total_inbound, row.total_outbound, trend
    );
    if !row.narrative.trim().is_empty() {
        text.push_str("\n\n");
        text.push_str(row.narrative.trim());
    }
    text
}

fn overview(table: &SummaryTable) -> String {
    let rows = table.rows();
    if rows.is_empty() {
        return no_data_message(&StateSelection::AllStates.to_string());
    }

    let total_moved = rows
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.total_inbound));
    let gainer = rows.iter().max_by_key(|r| (r.net(), Reverse(r.name.clone())));
    let loser = rows.iter().min_by_key(|r| (r.net(), r.name.clone()));

    let mut text = format!(
        "{} people moved between {} states.",
        total_moved,
        rows.len()
    );
    if let (Some(gainer), Some(loser)) = (gainer, loser) {
        if gainer.net() > 0 {
            text.push_str(&format!(
                " {} had the largest net gain ({}).",
                gainer.name,
                gainer.net()
            ));
        }
        if loser.net() < 0 {
            text.push_str(&format!(
                " {} had the largest net loss ({}).",
                loser.name,
                loser.net().unsigned_abs()
            ));
        }
    }
    text
}

/// Descriptor text for the current selection.
///
/// "All States" yields an overview of the whole table; an unknown state
/// yields the no-data message.
pub fn display_state_summary(state: &StateSelection, table: &SummaryTable) -> String {
    match state {
        StateSelection::AllStates => overview(table),
        StateSelection::State(name) => table
            .get(name)
            .map(describe)
            .unwrap_or_else(|| no_data_message(name)),
    }
}
