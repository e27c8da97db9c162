//! Snapshot handed to whatever renders the board

use serde::Serialize;

use crate::logs::{MovesOrientation, Summary};

/// Everything a renderer needs for the current cursor position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackView {
    pub game_id: String,
    pub game_name: String,
    pub game_index: usize,
    pub game_count: usize,
    /// 1-based step for display (0 when the game has no frames)
    pub display_step: usize,
    pub frame_count: usize,
    /// Rows of the active frame (empty when the game has no frames)
    pub frame_rows: Vec<String>,
    /// Shape to render with: the frame's own, or the game's recorded one
    pub rows: usize,
    pub cols: usize,
    /// Moves for the step after the filter was applied
    pub moves: Vec<String>,
    pub orientation: MovesOrientation,
    pub summary: Option<Summary>,
    pub reported_total_steps: Option<u64>,
    pub playing: bool,
    pub speed_ms: u64,
}

impl PlaybackView {
    /// `"Game 2/5  Step 14/120"` header line
    pub fn status_line(&self) -> String {
        format!(
            "Game {}/{}  Step {}/{}{}",
            self.game_index + 1,
            self.game_count,
            self.display_step,
            self.frame_count,
            if self.playing { "" } else { "  (paused)" }
        )
    }
}
