//! Pairing of viz and moves logs by file stem
//!
//! Files arrive in batches (one per folder selection). Each file is classified
//! by suffix, keyed by its stem, and folded into a pending pair holding at most
//! one viz payload and one moves payload. Games that are already loaded seed
//! the pending pairs first, so supplying only the moves folder later keeps the
//! frames of the earlier viz selection.

use std::collections::BTreeMap;

use bevy::log::debug;
use rayon::prelude::*;

use crate::constants::{MOVES_SUFFIX, VIZ_SUFFIX};
use crate::logs::{format_moves_log, format_viz_log};

use super::game::Game;

/// Which log a file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Viz,
    Moves,
}

impl LogKind {
    /// Classify by suffix (case-insensitive)
    pub fn from_file_name(name: &str) -> Option<Self> {
        let base = base_name(name);
        [LogKind::Viz, LogKind::Moves]
            .into_iter()
            .find(|kind| strip_suffix_ignore_case(base, kind.suffix()).is_some())
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            LogKind::Viz => VIZ_SUFFIX,
            LogKind::Moves => MOVES_SUFFIX,
        }
    }
}

/// Final path segment, accepting both `/` and `\` separators
fn base_name(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path)
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    if !name.is_char_boundary(split) || !name[split..].eq_ignore_ascii_case(suffix) {
        return None;
    }
    Some(&name[..split])
}

/// Stem of a log file: directory and recognized suffix removed.
///
/// Names without a recognized suffix are returned as their base name.
pub fn file_stem(path: &str) -> String {
    let base = base_name(path);
    [VIZ_SUFFIX, MOVES_SUFFIX]
        .into_iter()
        .find_map(|suffix| strip_suffix_ignore_case(base, suffix))
        .unwrap_or(base)
        .to_string()
}

/// A named log payload whose text can be fetched.
///
/// Reading is the caller's concern (files, network, memory); the pairer only
/// needs a name for classification and the full text.
pub trait LogSource: Send + Sync {
    fn name(&self) -> &str;
    fn read_text(&self) -> Result<String, String>;
}

/// Log payload already held in memory
#[derive(Debug, Clone)]
pub struct InMemoryLog {
    pub name: String,
    pub text: String,
}

impl InMemoryLog {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl LogSource for InMemoryLog {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_text(&self) -> Result<String, String> {
        Ok(self.text.clone())
    }
}

/// Read failure that aborts a whole batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for BatchReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to read {}: {}", self.file, self.message)
    }
}

impl std::error::Error for BatchReadError {}

/// Text of one log plus the name of the file it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLog {
    pub text: String,
    pub source: String,
}

/// Merge buffer for one stem
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingPair {
    pub viz: Option<PendingLog>,
    pub moves: Option<PendingLog>,
}

impl PendingPair {
    pub fn is_empty(&self) -> bool {
        self.viz.is_none() && self.moves.is_none()
    }

    fn slot_mut(&mut self, kind: LogKind) -> &mut Option<PendingLog> {
        match kind {
            LogKind::Viz => &mut self.viz,
            LogKind::Moves => &mut self.moves,
        }
    }
}

/// Pending pairs keyed by stem
pub type PendingPairs = BTreeMap<String, PendingPair>;

/// One successfully read batch file
#[derive(Debug, Clone)]
pub struct ReadLog {
    pub stem: String,
    pub kind: LogKind,
    pub source: String,
    pub text: String,
}

/// Seed pending pairs from games that are already loaded.
///
/// The seeded text is regenerated from the parsed data, so rebuilding a seeded
/// stem gives back the same frames, table and summary.
pub fn seed_from_games(games: &[Game]) -> PendingPairs {
    let mut pending = PendingPairs::new();
    for game in games {
        let pair = pending.entry(game.id.clone()).or_default();

        if !game.frames.is_empty() || game.sources.viz.is_some() {
            pair.viz = Some(PendingLog {
                text: format_viz_log(&game.frames),
                source: game
                    .sources
                    .viz
                    .clone()
                    .unwrap_or_else(|| format!("{}{}", game.id, VIZ_SUFFIX)),
            });
        }

        if game.summary.is_some() || game.has_moves() {
            pair.moves = Some(PendingLog {
                text: format_moves_log(&game.moves_table, game.summary.as_ref()),
                source: game
                    .sources
                    .moves
                    .clone()
                    .unwrap_or_else(|| format!("{}{}", game.id, MOVES_SUFFIX)),
            });
        }
    }
    pending
}

/// Read every recognized file of a batch concurrently.
///
/// Files without a `.viz.txt` / `.moves.txt` suffix are skipped unread. The
/// first read failure fails the whole batch. Results keep batch order.
pub fn read_batch<S: LogSource>(batch: &[S]) -> Result<Vec<ReadLog>, BatchReadError> {
    batch
        .par_iter()
        .filter_map(|source| {
            let name = source.name();
            match LogKind::from_file_name(name) {
                Some(kind) => Some((source, kind)),
                None => {
                    debug!("Skipping unrecognized log file {}", name);
                    None
                }
            }
        })
        .map(|(source, kind)| -> Result<ReadLog, BatchReadError> {
            let name = source.name();
            let text = source.read_text().map_err(|message| BatchReadError {
                file: name.to_string(),
                message,
            })?;
            Ok(ReadLog {
                stem: file_stem(name),
                kind,
                source: name.to_string(),
                text,
            })
        })
        .collect()
}

/// Fold read logs into pending pairs, overwriting existing slots.
/// Within a batch, a later file wins over an earlier one for the same slot.
pub fn merge_logs(pending: &mut PendingPairs, logs: Vec<ReadLog>) {
    for log in logs {
        let pair = pending.entry(log.stem).or_default();
        *pair.slot_mut(log.kind) = Some(PendingLog {
            text: log.text,
            source: log.source,
        });
    }
}

/// Seed from `games`, read `batch`, and merge. Nothing is merged if any read fails.
pub fn pair_batch<S: LogSource>(
    games: &[Game],
    batch: &[S],
) -> Result<PendingPairs, BatchReadError> {
    let logs = read_batch(batch)?;
    let mut pending = seed_from_games(games);
    merge_logs(&mut pending, logs);
    Ok(pending)
}
