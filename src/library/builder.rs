//! Game assembly from pending viz/moves pairs

use crate::constants::STEM_DELIMITER;
use crate::logs::{MovesOrientation, MovesTable, parse_frames, parse_moves};

use super::game::{Game, GameSources};
use super::pairing::{PendingPair, PendingPairs};

/// Build one game per stem that has at least one payload, sorted by display name.
///
/// Stems with neither payload are dropped.
pub fn build_games(pending: &PendingPairs) -> Vec<Game> {
    let mut games: Vec<Game> = pending
        .iter()
        .filter(|(_, pair)| !pair.is_empty())
        .map(|(stem, pair)| build_game(stem, pair))
        .collect();

    sort_games(&mut games);
    games
}

/// Order by display name ignoring case, then by exact name, then by id
pub fn sort_games(games: &mut [Game]) {
    games.sort_by_cached_key(|g| (g.name.to_lowercase(), g.name.clone(), g.id.clone()));
}

/// Parse both sides of one pair into a game
pub fn build_game(stem: &str, pair: &PendingPair) -> Game {
    let (frames, rows, cols) = match &pair.viz {
        Some(viz) => {
            let parsed = parse_frames(&viz.text);
            (parsed.frames, parsed.rows, parsed.cols)
        }
        None => (Vec::new(), 0, 0),
    };

    let (moves_table, moves_orientation, summary) = match &pair.moves {
        Some(moves) => {
            let parsed = parse_moves(&moves.text, frames.len());
            (parsed.table, parsed.orientation, Some(parsed.summary))
        }
        None => (MovesTable::new(), MovesOrientation::Unknown, None),
    };

    Game {
        id: stem.to_string(),
        name: prettify_name(stem),
        frames,
        rows,
        cols,
        moves_table,
        moves_orientation,
        summary,
        sources: GameSources {
            viz: pair.viz.as_ref().map(|v| v.source.clone()),
            moves: pair.moves.as_ref().map(|m| m.source.clone()),
        },
    }
}

/// Shorten a generated stem into `"<map> | <matchup> | <run>"`.
///
/// `GameManager__maps_mapA__Algorithm_X_vs_Algorithm_Y__run3__ts1712`
/// becomes `mapA | X_vs_Y | run3`. Stems with fewer than three parts are kept
/// as they are.
pub fn prettify_name(stem: &str) -> String {
    let parts: Vec<&str> = stem.split(STEM_DELIMITER).collect();
    if parts.len() < 3 {
        return stem.to_string();
    }

    let map = parts
        .iter()
        .find(|p| p.contains("map"))
        .copied()
        .unwrap_or(parts[0]);
    let matchup = parts
        .iter()
        .find(|p| p.contains("vs"))
        .copied()
        .unwrap_or(parts[1]);
    let run = parts
        .iter()
        .find(|p| p.starts_with("run"))
        .copied()
        .unwrap_or(parts[parts.len() - 1]);

    let map_tail = map.rsplit('_').next().unwrap_or(map);

    format!("{} | {} | {}", map_tail, matchup.replace("Algorithm_", ""), run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::pairing::{PendingLog, pair_batch};
    use crate::library::InMemoryLog;

    fn log(text: &str, source: &str) -> Option<PendingLog> {
        Some(PendingLog {
            text: text.to_string(),
            source: source.to_string(),
        })
    }

    #[test]
    fn test_prettify_generated_stem() {
        assert_eq!(
            prettify_name("GameManager__maps_mapA__Algorithm_X_vs_Algorithm_Y__run3__ts1712"),
            "mapA | X_vs_Y | run3"
        );
        assert_eq!(prettify_name("battle__mapA__X_vs_Y__run3"), "mapA | X_vs_Y | run3");
    }

    #[test]
    fn test_prettify_fallback_segments() {
        // No "map", "vs" or "run" parts: first, second and last segments
        assert_eq!(prettify_name("alpha__beta__gamma__delta"), "alpha | beta | delta");
        assert_eq!(prettify_name("short__stem"), "short__stem");
        assert_eq!(prettify_name("plain"), "plain");
    }

    #[test]
    fn test_viz_only_game() {
        let pair = PendingPair {
            viz: log("=== Game Step 1 ===\nAB\nC", "g.viz.txt"),
            moves: None,
        };
        let game = build_game("g", &pair);
        assert_eq!(game.frame_count(), 1);
        assert_eq!((game.rows, game.cols), (2, 2));
        assert!(game.moves_table.is_empty());
        assert_eq!(game.moves_orientation, MovesOrientation::Unknown);
        assert_eq!(game.summary, None);
        assert_eq!(game.sources.viz.as_deref(), Some("g.viz.txt"));
    }

    #[test]
    fn test_moves_only_game_keeps_summary_total() {
        let pair = PendingPair {
            viz: None,
            moves: log(
                "Shoot, DoNothing\nSummary: winner=0 reason=1 total game steps=99 player1 remaining tanks=2 player2 remaining tanks=2",
                "g.moves.txt",
            ),
        };
        let game = build_game("g", &pair);
        assert!(game.frames.is_empty());
        assert_eq!((game.rows, game.cols), (0, 0));
        assert_eq!(game.reported_total_steps(), Some(99));
        assert_eq!(game.moves_orientation, MovesOrientation::PerColumn);
    }

    #[test]
    fn test_moves_without_summary_still_attaches_record() {
        let pair = PendingPair {
            viz: log("=== Game Step 1 ===\nA", "g.viz.txt"),
            moves: log("Shoot", "g.moves.txt"),
        };
        let game = build_game("g", &pair);
        let summary = game.summary.expect("summary record");
        assert!(summary.is_empty());
        assert_eq!(game.moves_orientation, MovesOrientation::PerStep);
    }

    #[test]
    fn test_empty_pairs_dropped_and_sorted_by_name() {
        let mut pending = PendingPairs::new();
        pending.insert("empty".to_string(), PendingPair::default());
        pending.insert(
            "x__map_zeta__A_vs_B__run1".to_string(),
            PendingPair {
                viz: log("=== Game Step 1 ===\nA", "z.viz.txt"),
                moves: None,
            },
        );
        pending.insert(
            "x__map_alpha__A_vs_B__run2".to_string(),
            PendingPair {
                viz: None,
                moves: log("Shoot", "a.moves.txt"),
            },
        );

        let games = build_games(&pending);
        let names: Vec<&str> = games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["alpha | A_vs_B | run2", "zeta | A_vs_B | run1"]);
    }

    #[test]
    fn test_sort_ignores_case_first() {
        let mut games: Vec<Game> = ["Zeta", "alpha", "Alpha", "beta"]
            .iter()
            .map(|stem| build_game(stem, &PendingPair::default()))
            .collect();
        sort_games(&mut games);

        let ids: Vec<&str> = games.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["Alpha", "alpha", "beta", "Zeta"]);
    }

    #[test]
    fn test_equal_names_keep_distinct_ids() {
        let mut pending = PendingPairs::new();
        for stem in ["b__map1__A_vs_B__run1", "a__map1__A_vs_B__run1"] {
            pending.insert(
                stem.to_string(),
                PendingPair {
                    viz: log("=== Game Step 1 ===\nA", "v"),
                    moves: None,
                },
            );
        }
        let games = build_games(&pending);
        assert_eq!(games[0].name, games[1].name);
        assert_eq!(games[0].id, "a__map1__A_vs_B__run1");
        assert_eq!(games[1].id, "b__map1__A_vs_B__run1");
    }

    #[test]
    fn test_pair_and_build_example_files() {
        let batch = vec![
            InMemoryLog::new("battle__mapA__X_vs_Y__run3.viz.txt", "=== Game Step 1 ===\n#1\n=== Game Step 2 ===\n1#"),
            InMemoryLog::new("battle__mapA__X_vs_Y__run3.moves.txt", "Shoot\nMoveForward\n"),
        ];
        let games = build_games(&pair_batch(&[], &batch).unwrap());
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, "battle__mapA__X_vs_Y__run3");
        assert_eq!(games[0].frame_count(), 2);
        assert_eq!(games[0].moves_for_step(1), vec!["MoveForward"]);
    }
}
