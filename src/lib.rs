//! Tankreplay - replay engine for recorded tank battle logs
//!
//! Parses viz/moves log pairs into games and steps through them with a
//! Bevy-driven playback controller.

pub mod constants;
pub mod library;
pub mod logs;
pub mod replay;
pub mod settings;
pub mod sources;

// Re-export commonly used types for convenience
pub use constants::*;
pub use library::{
    BatchReadError, BatchReport, Game, GameLibrary, GameOverview, GameSources, InMemoryLog,
    LogKind, LogSource, build_games, file_stem, prettify_name,
};
pub use logs::{
    CellKind, Frame, GameEndReason, MovesOrientation, MovesTable, Summary, parse_frames,
    parse_moves,
};
pub use replay::{
    Direction, PlaybackCommand, PlaybackController, PlaybackView, ReplayAppBuilder,
    add_replay_systems,
};
pub use settings::{ReplaySettings, SETTINGS_FILE};
pub use sources::{FileLog, Playlist, collect_log_files, load_library, load_playlist};
