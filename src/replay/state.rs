//! Replay playback state

use std::time::Duration;

use bevy::prelude::*;

use crate::constants::{DEFAULT_SPEED_MS, MAX_SPEED_MS, MIN_SPEED_MS, SPEED_STEP_MS};
use crate::library::{Game, GameLibrary};
use crate::settings::ReplaySettings;

use super::schedule::TickSchedule;
use super::view::PlaybackView;

/// Direction for moving between games
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Cursor over the loaded games plus the play/pause, speed, loop and filter
/// controls.
///
/// Every operation is total: out-of-range input is clamped or wrapped and an
/// empty library turns everything into a no-op.
#[derive(Resource, Debug)]
pub struct PlaybackController {
    /// Index into the sorted game collection
    game_index: usize,
    /// 0-based frame index into the active game
    step: usize,
    playing: bool,
    /// Tick interval in milliseconds
    speed_ms: u64,
    loop_games: bool,
    filter_text: String,
    /// Live tick timer, present only while playing
    schedule: Option<TickSchedule>,
    /// Schedules created so far
    generation: u64,
    /// Ticks performed by `advance`
    ticks_performed: u64,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self {
            game_index: 0,
            step: 0,
            playing: false,
            speed_ms: DEFAULT_SPEED_MS,
            loop_games: true,
            filter_text: String::new(),
            schedule: None,
            generation: 0,
            ticks_performed: 0,
        }
    }
}

impl PlaybackController {
    pub fn game_index(&self) -> usize {
        self.game_index
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn loop_games(&self) -> bool {
        self.loop_games
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn ticks_performed(&self) -> u64 {
        self.ticks_performed
    }

    pub fn schedule(&self) -> Option<&TickSchedule> {
        self.schedule.as_ref()
    }

    pub fn current_game<'a>(&self, library: &'a GameLibrary) -> Option<&'a Game> {
        library.get(self.game_index)
    }

    fn frame_count(&self, library: &GameLibrary) -> usize {
        self.current_game(library).map_or(0, Game::frame_count)
    }

    // =========================================================================
    // SCHEDULING
    // =========================================================================

    /// Drop the current timer and, if playing, start a new one
    fn reschedule(&mut self) {
        self.schedule = None;
        if self.playing {
            self.generation += 1;
            self.schedule = Some(TickSchedule::new(self.speed_ms, self.generation));
            debug!(
                "Tick schedule #{} every {} ms",
                self.generation,
                self.speed_ms.max(MIN_SPEED_MS)
            );
        }
    }

    /// Move the cursor. Changing game restarts the timer.
    fn set_cursor(&mut self, game_index: usize, step: usize) {
        let game_changed = game_index != self.game_index;
        self.game_index = game_index;
        self.step = step;
        if game_changed {
            self.reschedule();
        }
    }

    /// Start over at the first game after the collection was rebuilt
    pub fn reset_for_library(&mut self, library: &GameLibrary) {
        self.game_index = 0;
        self.step = 0;
        self.reschedule();
        debug!("Playback reset for {} games", library.len());
    }

    // =========================================================================
    // STEP CONTROL
    // =========================================================================

    pub fn step_forward(&mut self, library: &GameLibrary) {
        let frames = self.frame_count(library);
        if frames == 0 {
            return;
        }
        self.step = (self.step + 1).min(frames - 1);
    }

    pub fn step_backward(&mut self, library: &GameLibrary) {
        let frames = self.frame_count(library);
        if frames == 0 {
            return;
        }
        self.step = self.step.saturating_sub(1).min(frames - 1);
    }

    /// Jump to a 1-based step number, clamped into the active game
    pub fn jump_to_step(&mut self, library: &GameLibrary, step_number: usize) {
        let frames = self.frame_count(library);
        if frames == 0 {
            return;
        }
        self.step = step_number.saturating_sub(1).min(frames - 1);
    }

    pub fn jump_to_first(&mut self) {
        self.step = 0;
    }

    pub fn jump_to_last(&mut self, library: &GameLibrary) {
        let frames = self.frame_count(library);
        if frames > 0 {
            self.step = frames - 1;
        }
    }

    /// Move to the next/previous game, wrapping both ways
    pub fn advance_game(&mut self, library: &GameLibrary, direction: Direction) {
        let count = library.len();
        if count == 0 {
            return;
        }
        let index = self.game_index.min(count - 1);
        let next = match direction {
            Direction::Next => (index + 1) % count,
            Direction::Previous => (index + count - 1) % count,
        };
        self.set_cursor(next, 0);
    }

    /// Select a game by id. Returns false when the id is unknown.
    pub fn select_game(&mut self, library: &GameLibrary, id: &str) -> bool {
        match library.index_of(id) {
            Some(index) => {
                self.set_cursor(index, 0);
                true
            }
            None => false,
        }
    }

    /// Keep the cursor on a game matching `query`.
    ///
    /// When the active game is not among the results, the first result is
    /// selected. Returns true if the cursor moved.
    pub fn apply_search(&mut self, library: &GameLibrary, query: &str) -> bool {
        let results = library.search(query);
        let Some(first) = results.first() else {
            return false;
        };
        let current_id = self.current_game(library).map(|g| g.id.as_str());
        if results.iter().any(|g| Some(g.id.as_str()) == current_id) {
            return false;
        }
        let first_id = first.id.clone();
        self.select_game(library, &first_id)
    }

    // =========================================================================
    // PLAYBACK
    // =========================================================================

    /// One playback tick.
    ///
    /// Steps forward; past the last frame it rolls to the next game (a game
    /// with no frames rolls over immediately). A single loaded game wraps to
    /// its own first frame. After the last game the cursor wraps to the first
    /// game when looping, otherwise it parks on the last game at step 0.
    pub fn tick(&mut self, library: &GameLibrary) {
        let Some(game) = self.current_game(library) else {
            return;
        };

        let next = self.step + 1;
        if next < game.frame_count() {
            self.step = next;
            return;
        }

        let count = library.len();
        if count <= 1 {
            self.step = 0;
            return;
        }

        let next_index = if self.game_index + 1 < count {
            self.game_index + 1
        } else if self.loop_games {
            0
        } else {
            self.game_index
        };
        self.set_cursor(next_index, 0);
    }

    /// Feed elapsed wall time to the schedule and run the ticks that are due.
    ///
    /// Returns the number of ticks performed. A tick that changes game starts
    /// a fresh interval, so any remaining time in `delta` is discarded.
    pub fn advance(&mut self, library: &GameLibrary, delta: Duration) -> u32 {
        if !self.playing {
            return 0;
        }
        let Some(schedule) = self.schedule.as_mut() else {
            return 0;
        };

        let due = schedule.advance(delta);
        let generation = schedule.generation();
        let mut performed = 0;
        for _ in 0..due {
            self.tick(library);
            performed += 1;
            self.ticks_performed += 1;
            if self.schedule.as_ref().map(TickSchedule::generation) != Some(generation) {
                break;
            }
        }
        performed
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.playing != playing {
            self.playing = playing;
            self.reschedule();
        }
    }

    pub fn toggle_play(&mut self) {
        self.set_playing(!self.playing);
    }

    /// Set the tick interval, clamped to `[MIN_SPEED_MS, MAX_SPEED_MS]`
    pub fn set_speed_ms(&mut self, speed_ms: u64) {
        let speed_ms = speed_ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS);
        if self.speed_ms != speed_ms {
            self.speed_ms = speed_ms;
            self.reschedule();
        }
    }

    /// Shorter interval
    pub fn faster(&mut self) {
        self.set_speed_ms(self.speed_ms.saturating_sub(SPEED_STEP_MS));
    }

    /// Longer interval
    pub fn slower(&mut self) {
        self.set_speed_ms(self.speed_ms + SPEED_STEP_MS);
    }

    pub fn set_loop_games(&mut self, loop_games: bool) {
        self.loop_games = loop_games;
    }

    // =========================================================================
    // MOVES
    // =========================================================================

    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
    }

    /// Moves for the current step, filtered case-insensitively by the filter text
    pub fn visible_moves(&self, library: &GameLibrary) -> Vec<String> {
        let Some(game) = self.current_game(library) else {
            return Vec::new();
        };
        let moves = game.moves_for_step(self.step);
        if self.filter_text.is_empty() {
            return moves;
        }
        let filter = self.filter_text.to_lowercase();
        moves
            .into_iter()
            .filter(|m| m.to_lowercase().contains(&filter))
            .collect()
    }

    /// Rendering snapshot for the cursor, or None with no games loaded
    pub fn view(&self, library: &GameLibrary) -> Option<PlaybackView> {
        let game = self.current_game(library)?;
        let (rows, cols) = game.frame_shape(self.step);
        Some(PlaybackView {
            game_id: game.id.clone(),
            game_name: game.name.clone(),
            game_index: self.game_index,
            game_count: library.len(),
            display_step: if game.frames.is_empty() { 0 } else { self.step + 1 },
            frame_count: game.frame_count(),
            frame_rows: game
                .frame(self.step)
                .map(|f| f.rows().to_vec())
                .unwrap_or_default(),
            rows,
            cols,
            moves: self.visible_moves(library),
            orientation: game.moves_orientation,
            summary: game.summary.clone(),
            reported_total_steps: game.reported_total_steps(),
            playing: self.playing,
            speed_ms: self.speed_ms,
        })
    }

    // =========================================================================
    // SETTINGS
    // =========================================================================

    pub fn apply_settings(&mut self, settings: &ReplaySettings) {
        self.set_speed_ms(settings.speed_ms);
        self.set_loop_games(settings.loop_games);
        self.set_filter_text(settings.filter.clone());
    }

    pub fn to_settings(&self) -> ReplaySettings {
        ReplaySettings {
            speed_ms: self.speed_ms,
            loop_games: self.loop_games,
            filter: self.filter_text.clone(),
            ..default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::MovesOrientation;

    fn sample_game(id: &str, frames: usize) -> Game {
        crate::library::sample_game(id, frames, &[], MovesOrientation::Unknown)
    }

    fn library(frames: &[usize]) -> GameLibrary {
        GameLibrary::from_games(
            frames
                .iter()
                .enumerate()
                .map(|(i, &n)| sample_game(&format!("game{}", i), n))
                .collect(),
        )
    }

    #[test]
    fn test_single_game_loops_on_itself() {
        let lib = library(&[4]);
        let mut pc = PlaybackController::default();
        for _ in 0..4 {
            pc.tick(&lib);
        }
        assert_eq!((pc.game_index(), pc.step()), (0, 0));
    }

    #[test]
    fn test_last_game_parks_without_loop() {
        let lib = library(&[2, 3]);
        let mut pc = PlaybackController::default();
        pc.set_loop_games(false);

        for _ in 0..2 {
            pc.tick(&lib);
        }
        assert_eq!((pc.game_index(), pc.step()), (1, 0));

        for _ in 0..3 {
            pc.tick(&lib);
        }
        assert_eq!((pc.game_index(), pc.step()), (1, 0));

        for _ in 0..10 {
            pc.tick(&lib);
            assert_eq!(pc.game_index(), 1);
        }
    }

    #[test]
    fn test_last_game_wraps_with_loop() {
        let lib = library(&[1, 2]);
        let mut pc = PlaybackController::default();
        pc.tick(&lib);
        assert_eq!((pc.game_index(), pc.step()), (1, 0));
        pc.tick(&lib);
        pc.tick(&lib);
        assert_eq!((pc.game_index(), pc.step()), (0, 0));
    }

    #[test]
    fn test_frameless_game_rolls_over() {
        let lib = library(&[0, 2]);
        let mut pc = PlaybackController::default();
        pc.tick(&lib);
        assert_eq!((pc.game_index(), pc.step()), (1, 0));
    }

    #[test]
    fn test_step_clamping() {
        let lib = library(&[3]);
        let mut pc = PlaybackController::default();
        pc.step_backward(&lib);
        assert_eq!(pc.step(), 0);
        for _ in 0..5 {
            pc.step_forward(&lib);
        }
        assert_eq!(pc.step(), 2);

        pc.jump_to_step(&lib, 2);
        assert_eq!(pc.step(), 1);
        pc.jump_to_step(&lib, 0);
        assert_eq!(pc.step(), 0);
        pc.jump_to_step(&lib, 99);
        assert_eq!(pc.step(), 2);

        pc.jump_to_first();
        assert_eq!(pc.step(), 0);
        pc.jump_to_last(&lib);
        assert_eq!(pc.step(), 2);
    }

    #[test]
    fn test_step_ops_noop_without_frames() {
        let lib = library(&[0]);
        let mut pc = PlaybackController::default();
        pc.step_forward(&lib);
        pc.jump_to_step(&lib, 3);
        pc.jump_to_last(&lib);
        assert_eq!(pc.step(), 0);

        let empty = GameLibrary::default();
        pc.tick(&empty);
        pc.advance_game(&empty, Direction::Next);
        assert_eq!((pc.game_index(), pc.step()), (0, 0));
        assert!(pc.view(&empty).is_none());
    }

    #[test]
    fn test_advance_game_wraps_both_ways() {
        let lib = library(&[2, 2, 2]);
        let mut pc = PlaybackController::default();
        pc.step_forward(&lib);

        pc.advance_game(&lib, Direction::Previous);
        assert_eq!((pc.game_index(), pc.step()), (2, 0));
        pc.advance_game(&lib, Direction::Next);
        assert_eq!(pc.game_index(), 0);
    }

    #[test]
    fn test_schedule_recreated_on_changes() {
        let lib = library(&[2, 2]);
        let mut pc = PlaybackController::default();
        assert!(pc.schedule().is_none());

        pc.toggle_play();
        let first = pc.schedule().unwrap().generation();

        pc.set_speed_ms(pc.speed_ms());
        assert_eq!(pc.schedule().unwrap().generation(), first);

        pc.faster();
        assert_eq!(pc.speed_ms(), 480);
        let second = pc.schedule().unwrap().generation();
        assert!(second > first);

        pc.advance_game(&lib, Direction::Next);
        assert!(pc.schedule().unwrap().generation() > second);

        pc.toggle_play();
        assert!(pc.schedule().is_none());
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut pc = PlaybackController::default();
        pc.set_speed_ms(1);
        assert_eq!(pc.speed_ms(), MIN_SPEED_MS);
        pc.faster();
        assert_eq!(pc.speed_ms(), MIN_SPEED_MS);
        pc.set_speed_ms(10_000);
        assert_eq!(pc.speed_ms(), MAX_SPEED_MS);
        pc.slower();
        assert_eq!(pc.speed_ms(), MAX_SPEED_MS);
    }

    #[test]
    fn test_advance_runs_due_ticks() {
        let lib = library(&[10]);
        let mut pc = PlaybackController::default();
        pc.set_speed_ms(100);

        assert_eq!(pc.advance(&lib, Duration::from_millis(500)), 0);

        pc.set_playing(true);
        assert_eq!(pc.advance(&lib, Duration::from_millis(250)), 2);
        assert_eq!(pc.step(), 2);
        assert_eq!(pc.ticks_performed(), 2);
    }

    #[test]
    fn test_advance_stops_at_game_change() {
        let lib = library(&[2, 5]);
        let mut pc = PlaybackController::default();
        pc.set_speed_ms(100);
        pc.set_playing(true);

        // Second tick crosses into game 1 and restarts the interval
        assert_eq!(pc.advance(&lib, Duration::from_millis(450)), 2);
        assert_eq!((pc.game_index(), pc.step()), (1, 0));
        assert_eq!(pc.advance(&lib, Duration::from_millis(50)), 0);
        assert_eq!(pc.advance(&lib, Duration::from_millis(50)), 1);
    }

    #[test]
    fn test_filter_and_select() {
        let mut game = crate::library::sample_game(
            "g",
            2,
            &[&["Shoot", "MoveForward"], &["RotateLeft"]],
            MovesOrientation::PerStep,
        );
        game.name = "zzz".to_string();
        let lib = GameLibrary::from_games(vec![sample_game("a", 1), game]);

        let mut pc = PlaybackController::default();
        assert!(pc.select_game(&lib, "g"));
        assert_eq!(pc.game_index(), 1);
        assert!(!pc.select_game(&lib, "missing"));

        pc.set_filter_text("SHOOT");
        assert_eq!(pc.visible_moves(&lib), vec!["Shoot"]);
        pc.set_filter_text("");
        assert_eq!(pc.visible_moves(&lib).len(), 2);
    }

    #[test]
    fn test_apply_search_moves_cursor() {
        let lib = library(&[1, 1, 1]);
        let mut pc = PlaybackController::default();
        pc.advance_game(&lib, Direction::Next);

        assert!(!pc.apply_search(&lib, "game1"));
        assert!(!pc.apply_search(&lib, "nothing"));
        assert_eq!(pc.game_index(), 1);

        assert!(pc.apply_search(&lib, "game2"));
        assert_eq!(pc.game_index(), 2);
    }

    #[test]
    fn test_reset_for_library() {
        let lib = library(&[3, 3]);
        let mut pc = PlaybackController::default();
        pc.advance_game(&lib, Direction::Next);
        pc.step_forward(&lib);
        pc.reset_for_library(&lib);
        assert_eq!((pc.game_index(), pc.step()), (0, 0));
    }

    #[test]
    fn test_view_snapshot() {
        let lib = library(&[3]);
        let mut pc = PlaybackController::default();
        pc.step_forward(&lib);
        let view = pc.view(&lib).unwrap();
        assert_eq!(view.display_step, 2);
        assert_eq!(view.frame_rows, vec!["1"]);
        assert_eq!((view.rows, view.cols), (1, 1));
        assert_eq!(view.status_line(), "Game 1/1  Step 2/3  (paused)");
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut pc = PlaybackController::default();
        pc.apply_settings(&ReplaySettings {
            speed_ms: 30,
            loop_games: false,
            filter: "fire".to_string(),
            ..default()
        });
        assert_eq!(pc.speed_ms(), MIN_SPEED_MS);
        assert!(!pc.loop_games());
        assert_eq!(pc.to_settings().filter, "fire");
    }
}
