//! The immutable per-game record assembled from a viz/moves pair

use serde::Serialize;

use crate::logs::{Frame, MovesOrientation, MovesTable, Summary};

/// Names of the files a game was built from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameSources {
    pub viz: Option<String>,
    pub moves: Option<String>,
}

/// One loaded game. Never mutated after it is built; a reload replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    /// Raw file stem, unique within a library
    pub id: String,
    /// Display label derived from the stem
    pub name: String,
    pub frames: Vec<Frame>,
    /// Shape of the first frame (0 when there are no frames)
    pub rows: usize,
    pub cols: usize,
    pub moves_table: MovesTable,
    pub moves_orientation: MovesOrientation,
    /// Present whenever a moves log was supplied
    pub summary: Option<Summary>,
    pub sources: GameSources,
}

impl Game {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, step: usize) -> Option<&Frame> {
        self.frames.get(step)
    }

    /// Shape of the frame at `step`, falling back to the game's recorded shape
    pub fn frame_shape(&self, step: usize) -> (usize, usize) {
        self.frame(step)
            .map(Frame::shape)
            .unwrap_or((self.rows, self.cols))
    }

    pub fn has_moves(&self) -> bool {
        !self.moves_table.is_empty()
    }

    /// Tokens for one step, according to the table's orientation.
    ///
    /// Column-major tables produce one `"Row <n>: <token>"` entry per lane that
    /// has a token at `step`.
    pub fn moves_for_step(&self, step: usize) -> Vec<String> {
        match self.moves_orientation {
            MovesOrientation::PerStep => self.moves_table.get(step).cloned().unwrap_or_default(),
            MovesOrientation::PerColumn => self
                .moves_table
                .iter()
                .enumerate()
                .filter_map(|(r, lane)| lane.get(step).map(|tok| format!("Row {}: {}", r + 1, tok)))
                .collect(),
            MovesOrientation::Unknown => Vec::new(),
        }
    }

    /// Total step count to display.
    ///
    /// The summary's count is authoritative; the frame count is only used when
    /// the summary has none.
    pub fn reported_total_steps(&self) -> Option<u64> {
        if let Some(total) = self.summary.as_ref().and_then(|s| s.total_steps) {
            return Some(total);
        }
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.len() as u64)
        }
    }

    /// Flattened listing row
    pub fn overview(&self) -> GameOverview {
        GameOverview {
            id: self.id.clone(),
            name: self.name.clone(),
            steps: self.frame_count(),
            rows: self.rows,
            cols: self.cols,
            orientation: self.moves_orientation,
            move_rows: self.moves_table.len(),
            reported_total_steps: self.reported_total_steps(),
            summary: self.summary.clone(),
            sources: self.sources.clone(),
        }
    }
}

/// Serializable per-game listing row
#[derive(Debug, Clone, Serialize)]
pub struct GameOverview {
    pub id: String,
    pub name: String,
    pub steps: usize,
    pub rows: usize,
    pub cols: usize,
    pub orientation: MovesOrientation,
    pub move_rows: usize,
    pub reported_total_steps: Option<u64>,
    pub summary: Option<Summary>,
    pub sources: GameSources,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Game with `frames` single-cell frames and the given table
    pub(crate) fn sample_game(
        id: &str,
        frames: usize,
        table: &[&[&str]],
        orientation: MovesOrientation,
    ) -> Game {
        Game {
            id: id.to_string(),
            name: id.to_string(),
            frames: (0..frames).map(|i| Frame::new(vec![i.to_string()])).collect(),
            rows: if frames > 0 { 1 } else { 0 },
            cols: if frames > 0 { 1 } else { 0 },
            moves_table: table
                .iter()
                .map(|r| r.iter().map(|t| t.to_string()).collect())
                .collect(),
            moves_orientation: orientation,
            summary: None,
            sources: GameSources::default(),
        }
    }

    #[test]
    fn test_per_step_lookup() {
        let game = sample_game("g", 2, &[&["a", "b"], &["c"]], MovesOrientation::PerStep);
        assert_eq!(game.moves_for_step(0), vec!["a", "b"]);
        assert_eq!(game.moves_for_step(1), vec!["c"]);
        assert!(game.moves_for_step(2).is_empty());
    }

    #[test]
    fn test_per_column_lookup() {
        let game = sample_game(
            "g",
            3,
            &[&["a0", "a1", "a2"], &["b0"]],
            MovesOrientation::PerColumn,
        );
        assert_eq!(game.moves_for_step(0), vec!["Row 1: a0", "Row 2: b0"]);
        assert_eq!(game.moves_for_step(2), vec!["Row 1: a2"]);
        assert!(game.moves_for_step(3).is_empty());
    }

    #[test]
    fn test_unknown_lookup_is_empty() {
        let game = sample_game("g", 5, &[&["a"], &["b"]], MovesOrientation::Unknown);
        assert!(game.moves_for_step(0).is_empty());
        assert!(game.has_moves());
    }

    #[test]
    fn test_reported_total_prefers_summary() {
        let mut game = sample_game("g", 0, &[], MovesOrientation::Unknown);
        assert_eq!(game.reported_total_steps(), None);

        game.summary = Some(Summary {
            total_steps: Some(120),
            ..Default::default()
        });
        assert_eq!(game.reported_total_steps(), Some(120));

        let mut with_frames = sample_game("h", 4, &[], MovesOrientation::Unknown);
        assert_eq!(with_frames.reported_total_steps(), Some(4));
        with_frames.summary = Some(Summary::default());
        assert_eq!(with_frames.reported_total_steps(), Some(4));
    }

    #[test]
    fn test_frame_shape_falls_back() {
        let mut game = sample_game("g", 1, &[], MovesOrientation::Unknown);
        game.frames.push(Frame::new(vec!["ABC".to_string(), "D".to_string()]));
        assert_eq!(game.frame_shape(0), (1, 1));
        assert_eq!(game.frame_shape(1), (2, 3));
        assert_eq!(game.frame_shape(7), (1, 1));
    }
}
