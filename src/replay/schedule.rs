//! Cancellable playback tick schedule

use std::time::Duration;

use bevy::prelude::*;

use crate::constants::MIN_SPEED_MS;

/// One recurring tick timer.
///
/// A schedule is never retuned in place: the controller drops it and builds a
/// new one (with a fresh generation) whenever playing, speed or the active game
/// changes, so a stale interval can never fire.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    timer: Timer,
    generation: u64,
}

impl TickSchedule {
    /// Interval is `max(MIN_SPEED_MS, speed_ms)`
    pub fn new(speed_ms: u64, generation: u64) -> Self {
        let interval = Duration::from_millis(speed_ms.max(MIN_SPEED_MS));
        Self {
            timer: Timer::new(interval, TimerMode::Repeating),
            generation,
        }
    }

    pub fn interval(&self) -> Duration {
        self.timer.duration()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance the clock by `delta` and return how many intervals completed
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.timer.tick(delta);
        self.timer.times_finished_this_tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_has_floor() {
        assert_eq!(TickSchedule::new(10, 1).interval(), Duration::from_millis(60));
        assert_eq!(TickSchedule::new(500, 1).interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_counts_completed_intervals() {
        let mut schedule = TickSchedule::new(100, 1);
        assert_eq!(schedule.advance(Duration::from_millis(50)), 0);
        assert_eq!(schedule.advance(Duration::from_millis(60)), 1);
        assert_eq!(schedule.advance(Duration::from_millis(290)), 3);
    }
}
