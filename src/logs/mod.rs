//! Viz and moves log parsing
//!
//! A recorded tank game produces two text logs sharing a name stem:
//! `<stem>.viz.txt` with one ASCII board per step, and `<stem>.moves.txt` with
//! the tank actions per step plus a trailing summary line. These modules turn
//! that text into frames, move tables and summaries, and write it back out.

mod format;
pub mod moves_parser;
mod types;
pub mod viz_parser;

pub use format::{format_moves_log, format_summary_line, format_viz_log};
pub use moves_parser::{
    ParsedMoves, classify_orientation, parse_moves, parse_summary_line, split_tokens,
};
pub use types::{CellKind, Frame, GameEndReason, MovesOrientation, MovesTable, Summary};
pub use viz_parser::{ParsedViz, parse_frames};
