//! Edge selection: rank each anchor's counterparts and keep the top N.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use migration_graph_core::{Direction, Edge, MigrationRecord, StateSelection, Threshold};
use tracing::debug;

/// Counterpart -> summed count, for one anchor.
type Flows<'a> = BTreeMap<&'a str, u64>;

/// Group qualifying records by anchor for the given direction.
///
/// Self-moves and zero counts are skipped; repeated pairs are summed,
/// saturating at `u64::MAX`.
fn group_by_anchor(records: &[MigrationRecord], direction: Direction) -> BTreeMap<&str, Flows<'_>> {
    let mut grouped: BTreeMap<&str, Flows<'_>> = BTreeMap::new();

    for record in records {
        if record.count == 0 || record.origin_state == record.destination_state {
            continue;
        }
        let (anchor, counterpart) = match direction {
            Direction::Outgoing => (&record.origin_state, &record.destination_state),
            Direction::Incoming => (&record.destination_state, &record.origin_state),
        };
        let count = grouped
            .entry(anchor.as_str())
            .or_default()
            .entry(counterpart.as_str())
            .or_default();
        *count = count.saturating_add(record.count);
    }

    grouped
}

/// Top `threshold` edges for one anchor, descending by count then by counterpart name.
fn select_for_anchor(
    anchor: &str,
    flows: &Flows<'_>,
    threshold: Threshold,
    direction: Direction,
) -> Vec<Edge> {
    // u128 so a sum of u64 counts cannot overflow.
    let total: u128 = flows.values().map(|&count| count as u128).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(&str, u64)> = flows.iter().map(|(&name, &count)| (name, count)).collect();
    ranked.sort_by(|a, b| match b.1.cmp(&a.1) {
        Ordering::Equal => a.0.cmp(b.0),
        other => other,
    });

    ranked
        .into_iter()
        .take(threshold.get())
        .map(|(counterpart, count)| {
            let percentage = count as f64 / total as f64 * 100.0;
            match direction {
                Direction::Outgoing => Edge::new(anchor, counterpart, count, percentage),
                Direction::Incoming => Edge::new(counterpart, anchor, count, percentage),
            }
        })
        .collect()
}

/// Select the strongest migration flows per anchor state.
///
/// Percentages are relative to the anchor's own total in `direction`, computed
/// over every qualifying counterpart rather than only the retained ones. An
/// unknown state yields an empty vector.
pub fn compute_edges(
    records: &[MigrationRecord],
    threshold: Threshold,
    state: &StateSelection,
    direction: Direction,
) -> Vec<Edge> {
    let grouped = group_by_anchor(records, direction);

    let edges: Vec<Edge> = match state {
        StateSelection::AllStates => grouped
            .iter()
            .flat_map(|(anchor, flows)| select_for_anchor(anchor, flows, threshold, direction))
            .collect(),
        StateSelection::State(name) => grouped
            .get(name.as_str())
            .map(|flows| select_for_anchor(name, flows, threshold, direction))
            .unwrap_or_default(),
    };

    debug!(
        state = %state,
        %direction,
        %threshold,
        anchors = grouped.len(),
        edges = edges.len(),
        "Selected edges"
    );

    edges
}
