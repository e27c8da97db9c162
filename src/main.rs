//! Tankreplay - headless terminal player for recorded tank games
//!
//! Loads viz/moves log folders, lists the games, then plays them back at the
//! configured tick speed, printing every newly displayed frame.
//!
//! Usage:
//!   cargo run -- --viz out/viz --moves out/moves
//!   cargo run -- --playlist replay.toml --speed 120 --no-loop
//!   cargo run -- game1.viz.txt game1.moves.txt --ticks 40

use std::path::PathBuf;

use bevy::prelude::*;
use tankreplay::{
    GameLibrary, PlaybackController, Playlist, ReplayAppBuilder, ReplaySettings, load_library,
    load_playlist,
};

fn main() {
    let config = PlayerConfig::from_args();

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

    if library.is_empty() {
        println!("No .viz.txt or .moves.txt files found.");
        return;
    }

    println!("Loaded {} games:", library.len());
    for (i, game) in library.games().iter().enumerate() {
        println!("  {:>3}. {} ({} steps)", i + 1, game.name, game.frame_count());
    }

    // Settings file, overridden by flags
    let mut settings = ReplaySettings::load();
    if let Some(speed) = config.speed_ms {
        settings.speed_ms = speed;
    }
    if config.no_loop {
        settings.loop_games = false;
    }
    if let Some(filter) = &config.filter {
        settings.filter = filter.clone();
    }
    let settings = settings.clamped();

    if config.save_settings
        && let Err(e) = settings.save()
    {
        eprintln!("Failed to save settings: {}", e);
    }

    let max_ticks = config.ticks.unwrap_or(library.total_frames().max(1) as u64);

    let mut builder = ReplayAppBuilder::new(library)
        .with_settings(settings)
        .with_logging();
    if let Some(id) = &config.start_game {
        builder = builder.with_start_game(id);
    }

    let mut app = builder.build();
    app.insert_resource(PlayerRun {
        max_ticks,
        last_shown: None,
    });
    app.add_systems(Update, (print_frame, exit_after_ticks).chain());
    app.run();
}

/// Progress of the terminal player
#[derive(Resource)]
struct PlayerRun {
    max_ticks: u64,
    /// (game index, step) last printed
    last_shown: Option<(usize, usize)>,
}

/// Print the frame whenever the cursor lands somewhere new
fn print_frame(
    library: Res<GameLibrary>,
    controller: Res<PlaybackController>,
    mut run: ResMut<PlayerRun>,
) {
    let cursor = (controller.game_index(), controller.step());
    if run.last_shown == Some(cursor) {
        return;
    }
    run.last_shown = Some(cursor);

    let Some(view) = controller.view(&library) else {
        return;
    };

    println!();
    println!("== {} ==", view.game_name);
    println!("{}", view.status_line());
    for row in &view.frame_rows {
        println!("  {}", row);
    }
    if !view.moves.is_empty() {
        println!("  moves: {}", view.moves.join(" | "));
    }
    if view.display_step == view.frame_count
        && let Some(outcome) = view.summary.as_ref().and_then(|s| s.outcome())
    {
        println!(
            "  {} (total steps {})",
            outcome,
            view.reported_total_steps
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string())
        );
    }
}

/// Stop after the requested number of playback ticks
fn exit_after_ticks(
    run: Res<PlayerRun>,
    controller: Res<PlaybackController>,
    mut app_exit: MessageWriter<AppExit>,
) {
    if controller.ticks_performed() >= run.max_ticks {
        app_exit.write(AppExit::Success);
    }
}

/// Configuration for the player
#[derive(Default)]
struct PlayerConfig {
    playlist: Playlist,
    playlist_file: Option<PathBuf>,
    speed_ms: Option<u64>,
    no_loop: bool,
    filter: Option<String>,
    start_game: Option<String>,
    ticks: Option<u64>,
    save_settings: bool,
    show_help: bool,
}

impl PlayerConfig {
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
                "--speed" => {
                    if i + 1 < args.len() {
                        config.speed_ms = args[i + 1].parse().ok();
                        i += 1;
                    }
                }
                "--filter" => {
                    if i + 1 < args.len() {
                        config.filter = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--game" => {
                    if i + 1 < args.len() {
                        config.start_game = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--ticks" => {
                    if i + 1 < args.len() {
                        config.ticks = args[i + 1].parse().ok();
                        i += 1;
                    }
                }
                "--no-loop" => {
                    config.no_loop = true;
                }
                "--save-settings" => {
                    config.save_settings = true;
                }
                "--help" | "-h" => {
                    config.show_help = true;
                }
                arg if !arg.starts_with('-') => {
                    // Positional argument: a single log file
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
        r#"Tankreplay - play back recorded tank games in the terminal

USAGE:
    cargo run -- [FILES...] [OPTIONS]

ARGUMENTS:
    FILES               Individual .viz.txt / .moves.txt files (one batch)

OPTIONS:
    --viz <DIR>         Folder of .viz.txt files (repeatable)
    --moves <DIR>       Folder of .moves.txt files (repeatable)
    --playlist <FILE>   TOML playlist with viz_dirs / moves_dirs / files
    --speed <MS>        Tick interval in ms (60-2000, default 500)
    --no-loop           Stay on the last game instead of wrapping
    --filter <TEXT>     Only show moves containing TEXT
    --game <ID>         Start on the game with this stem
    --ticks <N>         Exit after N steps (default: total frames)
    --save-settings     Write the effective settings to config/replay_settings.json
    --help, -h          Show this help

EXAMPLES:
    # Pair two output folders by file stem
    cargo run -- --viz out/viz --moves out/moves

    # Fast playback of a single game
    cargo run -- game1.viz.txt game1.moves.txt --speed 60

PLAYLIST FORMAT (TOML):
    viz_dirs = ["out/viz"]
    moves_dirs = ["out/moves"]
    files = ["extra/game7.viz.txt"]
"#
    );
}
