//! Text writer for viz and moves logs
//!
//! Produces the same layout the game manager writes, so the output parses back
//! into identical frames, tables and summaries.

use super::types::{Frame, MovesTable, Summary};

/// Render frames as a viz log with 1-based step markers
pub fn format_viz_log(frames: &[Frame]) -> String {
    let mut out = String::new();
    for (i, frame) in frames.iter().enumerate() {
        out.push_str(&format!("\n=== Game Step {} ===\n", i + 1));
        for row in frame.rows() {
            out.push_str(row);
            out.push('\n');
        }
    }
    out
}

/// Render a moves table, followed by the summary line when one was recorded
pub fn format_moves_log(table: &MovesTable, summary: Option<&Summary>) -> String {
    let mut out = String::new();
    for row in table {
        if row.is_empty() {
            // A lone comma keeps the empty row from being skipped as blank
            out.push(',');
        } else {
            out.push_str(&row.join(", "));
        }
        out.push('\n');
    }
    if let Some(line) = summary.and_then(format_summary_line) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Render the summary line, or `None` unless every field is set
pub fn format_summary_line(summary: &Summary) -> Option<String> {
    Some(format!(
        "Summary: winner={} reason={} total game steps={} player1 remaining tanks= {} player2 remaining tanks= {}",
        summary.winner.as_ref()?,
        summary.reason.as_ref()?,
        summary.total_steps?,
        summary.p1_remaining.as_ref()?,
        summary.p2_remaining.as_ref()?,
    ))
}
