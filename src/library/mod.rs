//! Loaded game collection
//!
//! Files are paired by stem (`pairing`), parsed into immutable [`Game`]
//! records (`builder`), and held in the [`GameLibrary`] resource sorted by
//! display name. Every successful batch replaces the whole collection.

mod builder;
mod game;
mod pairing;

pub use builder::{build_game, build_games, prettify_name, sort_games};
pub use game::{Game, GameOverview, GameSources};
pub use pairing::{
    BatchReadError, InMemoryLog, LogKind, LogSource, PendingLog, PendingPair, PendingPairs,
    ReadLog, file_stem, merge_logs, pair_batch, read_batch, seed_from_games,
};

#[cfg(test)]
pub(crate) use game::tests::sample_game;

use std::collections::HashMap;

use bevy::prelude::*;

/// Outcome of a committed batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Files in the batch (including skipped ones)
    pub files: usize,
    pub games_before: usize,
    pub games_after: usize,
}

/// Games sorted by display name, with an id lookup that does not depend on order
#[derive(Resource, Debug, Default)]
pub struct GameLibrary {
    games: Vec<Game>,
    index_by_id: HashMap<String, usize>,
}

impl GameLibrary {
    pub fn from_games(mut games: Vec<Game>) -> Self {
        sort_games(&mut games);
        let index_by_id = games
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id.clone(), i))
            .collect();
        Self { games, index_by_id }
    }

    /// Read, pair and build a batch, then replace the collection.
    ///
    /// Games already loaded are kept unless the batch brings a new payload for
    /// their stem. On a read failure the library is left untouched.
    pub fn load_batch<S: LogSource>(&mut self, batch: &[S]) -> Result<BatchReport, BatchReadError> {
        let pending = pair_batch(&self.games, batch)?;
        let games_before = self.games.len();

        *self = Self::from_games(build_games(&pending));

        let report = BatchReport {
            files: batch.len(),
            games_before,
            games_after: self.games.len(),
        };
        info!(
            "Loaded batch of {} files: {} games (was {})",
            report.files, report.games_after, report.games_before
        );
        Ok(report)
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Game> {
        self.games.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Game> {
        self.index_of(id).and_then(|i| self.games.get(i))
    }

    /// Games whose name or id contains `query` (case-insensitive, trimmed).
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Game> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return self.games.iter().collect();
        }
        self.games
            .iter()
            .filter(|g| g.name.to_lowercase().contains(&q) || g.id.to_lowercase().contains(&q))
            .collect()
    }

    pub fn overviews(&self) -> Vec<GameOverview> {
        self.games.iter().map(Game::overview).collect()
    }

    /// Frames across every game
    pub fn total_frames(&self) -> usize {
        self.games.iter().map(Game::frame_count).sum()
    }
}
