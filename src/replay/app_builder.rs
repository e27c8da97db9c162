//! Headless App Builder
//!
//! Builds a Bevy app that drives the playback controller from the frame clock
//! without a window. Used by the `tankreplay` player.

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::time::Duration;

use crate::constants::DEFAULT_RUNNER_HZ;
use crate::library::GameLibrary;
use crate::settings::ReplaySettings;

use super::add_replay_systems;
use super::state::PlaybackController;

/// Builder for creating headless replay apps
pub struct ReplayAppBuilder {
    library: GameLibrary,
    settings: ReplaySettings,
    start_game: Option<String>,
    autoplay: bool,
    logging: bool,
}

impl ReplayAppBuilder {
    pub fn new(library: GameLibrary) -> Self {
        Self {
            library,
            settings: ReplaySettings::default(),
            start_game: None,
            autoplay: true,
            logging: false,
        }
    }

    /// Apply speed, loop, filter and refresh-rate preferences
    pub fn with_settings(mut self, settings: ReplaySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Start on the game with this id instead of the first one
    pub fn with_start_game(mut self, id: &str) -> Self {
        self.start_game = Some(id.to_string());
        self
    }

    /// Start paused
    pub fn paused(mut self) -> Self {
        self.autoplay = false;
        self
    }

    /// Install LogPlugin (honors RUST_LOG)
    pub fn with_logging(mut self) -> Self {
        self.logging = true;
        self
    }

    /// Build the app with minimal plugins, the library and a configured controller.
    ///
    /// Callers add their own rendering / exit systems.
    pub fn build(self) -> App {
        let hz = if self.settings.runner_hz > 0.0 {
            self.settings.runner_hz
        } else {
            DEFAULT_RUNNER_HZ
        };

        let mut app = App::new();
        app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
            Duration::from_secs_f32(1.0 / hz),
        )));
        if self.logging {
            app.add_plugins(LogPlugin::default());
        }

        let mut controller = PlaybackController::default();
        controller.apply_settings(&self.settings);
        if let Some(id) = &self.start_game
            && !controller.select_game(&self.library, id)
        {
            warn!("No game with id {}, starting at the first game", id);
        }
        controller.set_playing(self.autoplay);

        app.insert_resource(self.library);
        app.insert_resource(controller);
        add_replay_systems(&mut app);

        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::sample_game;
    use crate::logs::MovesOrientation;

    fn library() -> GameLibrary {
        GameLibrary::from_games(vec![
            sample_game("a", 2, &[], MovesOrientation::Unknown),
            sample_game("b", 2, &[], MovesOrientation::Unknown),
        ])
    }

    #[test]
    fn test_builder_creates_app() {
        let app = ReplayAppBuilder::new(library()).build();
        assert!(app.world().contains_resource::<GameLibrary>());
        let controller = app.world().resource::<PlaybackController>();
        assert!(controller.is_playing());
        assert_eq!(controller.speed_ms(), 500);
    }

    #[test]
    fn test_builder_applies_start_game_and_settings() {
        let app = ReplayAppBuilder::new(library())
            .with_settings(ReplaySettings {
                speed_ms: 200,
                loop_games: false,
                ..default()
            })
            .with_start_game("b")
            .paused()
            .build();
        let controller = app.world().resource::<PlaybackController>();
        assert_eq!(controller.game_index(), 1);
        assert_eq!(controller.speed_ms(), 200);
        assert!(!controller.loop_games());
        assert!(!controller.is_playing());
    }
}
