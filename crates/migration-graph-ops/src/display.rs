//! Flattening selected edges into rows for tabular display.

use migration_graph_core::{Direction, Edge};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One row of the migration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableRow {
    /// State people moved out of.
    pub from: String,
    /// State people moved into.
    pub to: String,
    /// Number of people.
    pub value: u64,
    /// Share of the anchor total, e.g. `"62.50%"`.
    pub percent: String,
}

/// Column labels for the table. The anchor column sits on the side people
/// leave for outgoing flows and on the side they arrive at for incoming ones.
pub fn table_headers(direction: Direction) -> [&'static str; 4] {
    match direction {
        Direction::Outgoing => ["State", "Destination", "People", "Percent"],
        Direction::Incoming => ["Origin", "State", "People", "Percent"],
    }
}

/// Format a share as a two-decimal percentage.
pub fn format_percent(percentage: f64) -> String {
    format!("{:.2}%", percentage)
}

/// Convert selected edges to display rows, keeping at most `cap` of them.
///
/// Rows keep the selection order and always read source -> target, since
/// edges are already oriented by direction. `direction` only picks which
/// column [`table_headers`] labels as the anchor.
pub fn table_edges(edges: &[Edge], direction: Direction, cap: usize) -> Vec<TableRow> {
    let rows: Vec<TableRow> = edges
        .iter()
        .take(cap)
        .map(|edge| TableRow {
            from: edge.source.clone(),
            to: edge.target.clone(),
            value: edge.value,
            percent: format_percent(edge.percentage),
        })
        .collect();
    debug!(%direction, rows = rows.len(), total = edges.len(), "Built display table");
    rows
}

/// Render rows as a fixed-width text table.
pub fn render_text_table(rows: &[TableRow], direction: Direction) -> String {
    let headers = table_headers(direction);
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| [r.from.clone(), r.to.clone(), r.value.to_string(), r.percent.clone()])
        .collect();

    let mut widths = headers.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let line = |out: &mut String, cols: [&str; 4]| {
        out.push_str(&format!(
            "{:<w0$}  {:<w1$}  {:>w2$}  {:>w3$}\n",
            cols[0],
            cols[1],
            cols[2],
            cols[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        ));
    };

    line(&mut out, headers);
    out.push_str(&format!("{:─<1$}\n", "", widths.iter().sum::<usize>() + 6));
    for row in &cells {
        line(&mut out, [row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()]);
    }
    out
}
