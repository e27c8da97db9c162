//! Shared data types for parsed viz and moves logs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// One parsed board snapshot.
///
/// Rows are always padded with [`FILLER_GLYPH`] to the longest row, so every
/// row of a frame has the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frame {
    rows: Vec<String>,
}

impl Frame {
    /// Build a frame from raw rows, right-padding short rows with the filler glyph.
    /// Rows are never truncated.
    pub fn new(rows: Vec<String>) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|row| {
                let missing = width - row.chars().count();
                if missing == 0 {
                    row
                } else {
                    let mut padded = row;
                    padded.extend(std::iter::repeat_n(FILLER_GLYPH, missing));
                    padded
                }
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells per row (in chars)
    pub fn width(&self) -> usize {
        self.rows.first().map(|r| r.chars().count()).unwrap_or(0)
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    /// Glyph at column `x`, row `y`
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        self.rows.get(y).and_then(|row| row.chars().nth(x))
    }

    pub fn is_rectangular(&self) -> bool {
        let width = self.width();
        self.rows.iter().all(|r| r.chars().count() == width)
    }

    /// Count tank glyphs per player id
    pub fn tank_counts(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for glyph in self.rows.iter().flat_map(|r| r.chars()) {
            if let CellKind::Tank(player) = CellKind::from_glyph(glyph) {
                *counts.entry(player).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Moves tokens, `table[row][col]`. Rows may be jagged.
pub type MovesTable = Vec<Vec<String>>;

/// Layout convention of a moves table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MovesOrientation {
    /// Neither layout fits; lookups yield nothing
    #[default]
    Unknown,
    /// Row `i` holds every token of step `i`
    PerStep,
    /// `table[r][s]` is lane `r`'s token at step `s`
    PerColumn,
}

impl MovesOrientation {
    pub fn label(&self) -> &'static str {
        match self {
            MovesOrientation::Unknown => "unknown",
            MovesOrientation::PerStep => "perStep",
            MovesOrientation::PerColumn => "perColumn",
        }
    }
}

impl std::fmt::Display for MovesOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// End-of-game record from the moves log summary line.
///
/// Fields stay unset when no summary line was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub winner: Option<String>,
    pub reason: Option<String>,
    pub total_steps: Option<u64>,
    pub p1_remaining: Option<String>,
    pub p2_remaining: Option<String>,
}

impl Summary {
    /// True when no summary line was matched
    pub fn is_empty(&self) -> bool {
        self.winner.is_none()
            && self.reason.is_none()
            && self.total_steps.is_none()
            && self.p1_remaining.is_none()
            && self.p2_remaining.is_none()
    }

    pub fn end_reason(&self) -> Option<GameEndReason> {
        self.reason.as_deref().map(GameEndReason::from_code)
    }

    /// Human-readable result ("Player 1 wins", "Tie")
    pub fn outcome(&self) -> Option<String> {
        let winner = self.winner.as_deref()?;
        match winner.parse::<u64>() {
            Ok(0) => Some("Tie".to_string()),
            Ok(player) => Some(format!("Player {} wins", player)),
            Err(_) => Some(format!("Winner {}", winner)),
        }
    }
}

/// Why a game ended, from the summary's numeric reason code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEndReason {
    AllTanksDead,
    MaxSteps,
    ZeroShells,
    Unknown(String),
}

impl GameEndReason {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "0" => GameEndReason::AllTanksDead,
            "1" => GameEndReason::MaxSteps,
            "2" => GameEndReason::ZeroShells,
            other => GameEndReason::Unknown(other.to_string()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            GameEndReason::AllTanksDead => "all tanks dead".to_string(),
            GameEndReason::MaxSteps => "max steps reached".to_string(),
            GameEndReason::ZeroShells => "out of shells".to_string(),
            GameEndReason::Unknown(code) => format!("reason {}", code),
        }
    }
}

/// What a board glyph stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Wall,
    DamagedWall,
    Mine,
    Shell,
    /// Tank owned by the given player id
    Tank(u32),
    Unknown(char),
}

impl CellKind {
    pub fn from_glyph(glyph: char) -> Self {
        match glyph {
            FILLER_GLYPH => CellKind::Empty,
            WALL_GLYPH => CellKind::Wall,
            DAMAGED_WALL_GLYPH => CellKind::DamagedWall,
            MINE_GLYPH => CellKind::Mine,
            SHELL_GLYPH => CellKind::Shell,
            c => match c.to_digit(10) {
                Some(player) => CellKind::Tank(player),
                None => CellKind::Unknown(c),
            },
        }
    }

    pub fn label(&self) -> String {
        match self {
            CellKind::Empty => "Empty".to_string(),
            CellKind::Wall => "Wall".to_string(),
            CellKind::DamagedWall => "Damaged wall".to_string(),
            CellKind::Mine => "Mine".to_string(),
            CellKind::Shell => "Shell".to_string(),
            CellKind::Tank(player) => format!("Player {} Tank", player),
            CellKind::Unknown(c) => format!("Unknown: {}", c),
        }
    }
}
