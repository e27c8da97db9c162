//! Replay system for stepping through loaded tank games.
//!
//! The playback controller owns the game/step cursor and a cancellable tick
//! schedule. Bevy systems feed it frame time and control commands; renderers
//! read a [`PlaybackView`] snapshot.

mod app_builder;
mod schedule;
mod state;
mod systems;
mod view;

pub use app_builder::ReplayAppBuilder;
pub use schedule::TickSchedule;
pub use state::{Direction, PlaybackController};
pub use systems::{
    PlaybackCommand, apply_playback_commands, replay_playback, reset_on_library_change,
};
pub use view::PlaybackView;

use bevy::prelude::*;

use crate::library::GameLibrary;

/// Register the playback resources, message and systems on `app`.
///
/// Resources already inserted are kept. Expects a `Time` resource.
pub fn add_replay_systems(app: &mut App) {
    app.init_resource::<GameLibrary>();
    app.init_resource::<PlaybackController>();
    app.add_message::<PlaybackCommand>();
    app.add_systems(
        Update,
        (
            reset_on_library_change,
            apply_playback_commands,
            replay_playback,
        )
            .chain(),
    );
}
