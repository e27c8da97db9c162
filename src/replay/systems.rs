//! Replay playback systems

use bevy::prelude::*;

use crate::library::GameLibrary;

use super::state::{Direction, PlaybackController};

/// Control input from whatever front end drives playback (keys, scripts, tests).
/// Each variant maps onto one controller operation.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackCommand {
    TogglePlay,
    SetPlaying(bool),
    StepForward,
    StepBackward,
    NextGame,
    PreviousGame,
    /// 1-based step number
    JumpToStep(usize),
    JumpToFirst,
    JumpToLast,
    SelectGame(String),
    Search(String),
    SetFilter(String),
    SetSpeed(u64),
    Faster,
    Slower,
    SetLoop(bool),
}

/// Apply queued control commands in arrival order
pub fn apply_playback_commands(
    mut messages: MessageReader<PlaybackCommand>,
    library: Res<GameLibrary>,
    mut controller: ResMut<PlaybackController>,
) {
    for command in messages.read() {
        match command {
            PlaybackCommand::TogglePlay => controller.toggle_play(),
            PlaybackCommand::SetPlaying(playing) => controller.set_playing(*playing),
            PlaybackCommand::StepForward => controller.step_forward(&library),
            PlaybackCommand::StepBackward => controller.step_backward(&library),
            PlaybackCommand::NextGame => controller.advance_game(&library, Direction::Next),
            PlaybackCommand::PreviousGame => {
                controller.advance_game(&library, Direction::Previous)
            }
            PlaybackCommand::JumpToStep(n) => controller.jump_to_step(&library, *n),
            PlaybackCommand::JumpToFirst => controller.jump_to_first(),
            PlaybackCommand::JumpToLast => controller.jump_to_last(&library),
            PlaybackCommand::SelectGame(id) => {
                if !controller.select_game(&library, id) {
                    warn!("No game with id {}", id);
                }
            }
            PlaybackCommand::Search(query) => {
                controller.apply_search(&library, query);
            }
            PlaybackCommand::SetFilter(text) => controller.set_filter_text(text.clone()),
            PlaybackCommand::SetSpeed(ms) => controller.set_speed_ms(*ms),
            PlaybackCommand::Faster => controller.faster(),
            PlaybackCommand::Slower => controller.slower(),
            PlaybackCommand::SetLoop(loop_games) => controller.set_loop_games(*loop_games),
        }
    }
}

/// Put the cursor back on the first game whenever the library is replaced
pub fn reset_on_library_change(
    library: Res<GameLibrary>,
    mut controller: ResMut<PlaybackController>,
) {
    // The initial insert is not a rebuild; a selection made before startup stays
    if !library.is_changed() || library.is_added() {
        return;
    }
    info!("Game library changed, {} games", library.len());
    controller.reset_for_library(&library);
}

/// Main playback system - feeds frame time to the tick schedule
pub fn replay_playback(
    time: Res<Time>,
    library: Res<GameLibrary>,
    mut controller: ResMut<PlaybackController>,
) {
    if !controller.is_playing() {
        return;
    }
    controller.advance(&library, time.delta());
}
