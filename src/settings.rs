//! Game settings and preferences
//!
//! Read from an optional JSON file next to the working directory. Missing
//! fields fall back to the defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Default settings file name (native only)
pub const SETTINGS_FILE: &str = "flappy-gopher.json";

/// Largest accepted screen edge in pixels
pub const MAX_SCREEN_SIZE: i32 = 16_384;
/// Largest accepted tick rate
pub const MAX_TARGET_FPS: u32 = 1_000;
/// Largest accepted spawn cap
pub const MAX_SPAWN_CAP: usize = 1_024;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub screen_width: i32,
    pub screen_height: i32,
    /// Ticks per second the loop targets
    pub target_fps: u32,

    // === Rules ===
    /// Pixels moved per tick
    pub gravity: i32,
    pub score_per_tick: f64,
    pub spawn_margin: i32,
    pub spawn_interval: f64,
    /// Spawning stops once the obstacle count exceeds this
    pub spawn_cap: usize,
    /// Fixed RNG seed; clock-seeded when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            target_fps: TARGET_TICKS_PER_SECOND,

            gravity: GRAVITY,
            score_per_tick: SCORE_PER_TICK,
            spawn_margin: SPAWN_MARGIN,
            spawn_interval: SPAWN_INTERVAL,
            spawn_cap: SPAWN_CAP,
            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

/// Why a settings file was rejected
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(&'static str),
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `SETTINGS_FILE`, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new(SETTINGS_FILE);
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with. Every accepted value
    /// keeps the per-tick integer arithmetic in range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let screen = 1..=MAX_SCREEN_SIZE;
        if !screen.contains(&self.screen_width) || !screen.contains(&self.screen_height) {
            return Err(SettingsError::Invalid("screen size out of range"));
        }
        if !(1..=MAX_TARGET_FPS).contains(&self.target_fps) {
            return Err(SettingsError::Invalid("target_fps out of range"));
        }
        if !(1..=self.screen_height).contains(&self.gravity) {
            return Err(SettingsError::Invalid("gravity must be between 1 and the screen height"));
        }
        let band = self
            .spawn_margin
            .checked_mul(2)
            .map(|margins| self.screen_height - margins);
        if self.spawn_margin < 0 || band.is_none_or(|band| band <= 0) {
            return Err(SettingsError::Invalid("spawn band is empty"));
        }
        if self.spawn_cap > MAX_SPAWN_CAP {
            return Err(SettingsError::Invalid("spawn_cap out of range"));
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.spawn_interval) || !positive(self.score_per_tick) {
            return Err(SettingsError::Invalid("score rates must be positive"));
        }
        Ok(())
    }

    /// Effective sound effect volume (0 when muted)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music volume (0 when muted)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }
}
