//! Inspect Tool - list the games a set of log folders produces
//!
//! Pairs viz/moves files by stem exactly as the player does and prints one
//! line per game, or the full overview as JSON.
//!
//! Usage:
//!   cargo run --bin inspect -- --viz out/viz --moves out/moves
//!   cargo run --bin inspect -- --playlist replay.toml --json
//!   cargo run --bin inspect -- --viz out/viz --search mapA

use std::path::PathBuf;

use tankreplay::{CellKind, Game, Playlist, load_library, load_playlist};

fn main() {
    let config = InspectConfig::from_args();

    if config.show_help {
        print_help();
        return;
    }

    let mut playlist = config.playlist.clone();
    if let Some(path) = &config.playlist_file {
        match load_playlist(path) {
            Ok(loaded) => playlist.extend(loaded),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }

    if playlist.is_empty() {
        print_help();
        std::process::exit(1);
    }

    let library = match load_library(&playlist) {
        Ok(library) => library,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let games = library.search(config.search.as_deref().unwrap_or(""));

    if config.json {
        let overviews: Vec<_> = games.iter().map(|g| g.overview()).collect();
        match serde_json::to_string_pretty(&overviews) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize overview: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if games.is_empty() {
        println!("No games found.");
        return;
    }

    println!(
        "{:<32} {:>6} {:>9} {:>10} {:<24} {}",
        "GAME", "STEPS", "BOARD", "MOVES", "RESULT", "ID"
    );
    println!("{}", "-".repeat(100));
    for game in &games {
        println!("{}", format_row(game));
    }
    println!("\n{} of {} games", games.len(), library.len());

    if config.legend {
        print_legend(&games);
    }
}

fn format_row(game: &Game) -> String {
    let steps = game
        .reported_total_steps()
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());
    let result = game
        .summary
        .as_ref()
        .and_then(|s| {
            let outcome = s.outcome()?;
            Some(match s.end_reason() {
                Some(reason) => format!("{} ({})", outcome, reason.label()),
                None => outcome,
            })
        })
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:<32} {:>6} {:>9} {:>10} {:<24} {}",
        game.name,
        steps,
        format!("{}x{}", game.rows, game.cols),
        game.moves_orientation.label(),
        result,
        game.id
    )
}

/// Glyph counts over the first frame of every listed game
fn print_legend(games: &[&Game]) {
    let mut counts: std::collections::BTreeMap<String, usize> = Default::default();
    for game in games {
        let Some(frame) = game.frame(0) else {
            continue;
        };
        for row in frame.rows() {
            for glyph in row.chars() {
                *counts.entry(CellKind::from_glyph(glyph).label()).or_default() += 1;
            }
        }
    }

    println!("\nFirst-frame cells:");
    for (label, count) in counts {
        println!("  {:<20} {}", label, count);
    }
}

/// Configuration for the inspect tool
#[derive(Default)]
struct InspectConfig {
    playlist: Playlist,
    playlist_file: Option<PathBuf>,
    search: Option<String>,
    json: bool,
    legend: bool,
    show_help: bool,
}

impl InspectConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--viz" => {
                    if i + 1 < args.len() {
                        config.playlist.viz_dirs.push(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                }
                "--moves" => {
                    if i + 1 < args.len() {
                        config.playlist.moves_dirs.push(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                }
                "--playlist" => {
                    if i + 1 < args.len() {
                        config.playlist_file = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                }
                "--search" => {
                    if i + 1 < args.len() {
                        config.search = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--json" => {
                    config.json = true;
                }
                "--legend" => {
                    config.legend = true;
                }
                "--help" | "-h" => {
                    config.show_help = true;
                }
                arg if !arg.starts_with('-') => {
                    config.playlist.files.push(PathBuf::from(arg));
                }
                _ => {}
            }
            i += 1;
        }

        config
    }
}

fn print_help() {
    println!(
        r#"Inspect Tool - list games paired from viz/moves logs

USAGE:
    cargo run --bin inspect -- [FILES...] [OPTIONS]

OPTIONS:
    --viz <DIR>         Folder of .viz.txt files (repeatable)
    --moves <DIR>       Folder of .moves.txt files (repeatable)
    --playlist <FILE>   TOML playlist with viz_dirs / moves_dirs / files
    --search <TEXT>     Only games whose name or id contains TEXT
    --json              Print the overview as JSON
    --legend            Count board cells by kind over each first frame
    --help, -h          Show this help
"#
    );
}
