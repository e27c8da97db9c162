//! Moves log parser
//!
//! Each non-blank line of a moves log is either a comma-separated token row
//! or the end-of-game summary line:
//!
//! ```text
//! MoveForward, RotateLeft90
//! Shoot, DoNothing (killed)
//! Summary: winner=1 reason=0 total game steps=2 player1 remaining tanks= 1 player2 remaining tanks= 0
//! ```
//!
//! The file carries no tag saying whether rows are steps or tank lanes, so the
//! layout is inferred from the frame count (see [`classify_orientation`]).

use std::sync::LazyLock;

use super::types::{MovesOrientation, MovesTable, Summary};

static SUMMARY_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"(?i)Summary:\s*winner\s*=\s*([0-9]+)\s+reason\s*=\s*([0-9]+)\s+total\s+game\s+steps\s*=\s*([0-9]+)\s+player1\s+remaining\s+tanks\s*=\s*([0-9]+)\s+player2\s+remaining\s+tanks\s*=\s*([0-9]+)",
    )
    .expect("valid summary line regex")
});

/// Parsed moves log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMoves {
    pub table: MovesTable,
    pub orientation: MovesOrientation,
    /// Always present for a parsed payload; fields stay unset without a summary line
    pub summary: Summary,
}

/// Parse moves log content.
///
/// `num_frames` is the frame count of the paired viz log (0 if there is none).
/// A later summary line overrides an earlier one.
pub fn parse_moves(text: &str, num_frames: usize) -> ParsedMoves {
    let mut table = MovesTable::new();
    let mut summary = Summary::default();

    for raw in text.replace('\r', "").split('\n') {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if SUMMARY_RE.is_match(line) {
            // A step total too large for u64 drops the whole line
            if let Some(found) = parse_summary_line(line) {
                summary = found;
            }
            continue;
        }

        table.push(split_tokens(line));
    }

    let orientation = classify_orientation(&table, num_frames);

    ParsedMoves {
        table,
        orientation,
        summary,
    }
}

/// Match a line against the summary pattern.
///
/// Either every field is set or the line yields `None`.
pub fn parse_summary_line(line: &str) -> Option<Summary> {
    let caps = SUMMARY_RE.captures(line)?;
    let field = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
    let total_steps = caps.get(3)?.as_str().parse::<u64>().ok()?;

    Some(Summary {
        winner: field(1),
        reason: field(2),
        total_steps: Some(total_steps),
        p1_remaining: field(4),
        p2_remaining: field(5),
    })
}

/// Split a row on commas, trimming tokens and dropping empty ones
pub fn split_tokens(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Infer the table layout.
///
/// Row count equal to the frame count means one row per step, and wins even
/// when a row is also long enough to be read as columns. Otherwise a row with
/// at least `num_frames` tokens means one row per lane.
pub fn classify_orientation(table: &MovesTable, num_frames: usize) -> MovesOrientation {
    if table.len() == num_frames {
        return MovesOrientation::PerStep;
    }

    let max_cols = table.iter().map(Vec::len).max().unwrap_or(0);
    if max_cols >= num_frames {
        MovesOrientation::PerColumn
    } else {
        MovesOrientation::Unknown
    }
}
