//! Persistent playback preferences
//!
//! Saves and loads tick speed, loop policy, move filter and the headless
//! refresh rate to/from replay_settings.json in the config directory.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::{DEFAULT_RUNNER_HZ, DEFAULT_SPEED_MS, MAX_SPEED_MS, MIN_SPEED_MS};

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/replay_settings.json";

/// Playback preferences that survive between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    /// Tick interval in milliseconds
    pub speed_ms: u64,
    /// Wrap from the last game back to the first
    pub loop_games: bool,
    /// Move filter text
    pub filter: String,
    /// Headless app updates per second
    pub runner_hz: f32,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            speed_ms: DEFAULT_SPEED_MS,
            loop_games: true,
            filter: String::new(),
            runner_hz: DEFAULT_RUNNER_HZ,
        }
    }
}

impl ReplaySettings {
    /// Load settings from the default file, or return defaults
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    /// Load settings from `path`, or return defaults if it is missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No {} found, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Self>(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    settings.clamped()
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(Path::new(SETTINGS_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Copy with out-of-range values pulled back into bounds
    pub fn clamped(&self) -> Self {
        let runner_hz = if self.runner_hz.is_finite() && self.runner_hz > 0.0 {
            self.runner_hz
        } else {
            DEFAULT_RUNNER_HZ
        };
        Self {
            speed_ms: self.speed_ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS),
            loop_games: self.loop_games,
            filter: self.filter.clone(),
            runner_hz,
        }
    }
}
