//! Flappy Gopher - A side-scrolling asteroid dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, screens)
//! - `renderer`: Per-frame draw list composition
//! - `audio`: Music and sound effect scheduling
//! - `platform`: Presentation collaborator (window, input, drawing, audio, assets)
//! - `game`: Fixed-tick loop controller wiring it all together

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, StartupError};
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Window title
    pub const WINDOW_TITLE: &str = "Flappy Gopher";

    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 450;

    /// Fixed tick rate the loop targets
    pub const TARGET_TICKS_PER_SECOND: u32 = 60;

    /// Pixels moved per tick, vertically by the player and horizontally by obstacles
    pub const GRAVITY: i32 = 3;

    /// Score gained per gameplay tick
    pub const SCORE_PER_TICK: f64 = 0.25;

    /// Obstacles never spawn within this many pixels of the top or bottom edge
    pub const SPAWN_MARGIN: i32 = 50;
    /// A new obstacle may spawn whenever the score is a multiple of this
    pub const SPAWN_INTERVAL: f64 = 100.0;
    /// Spawning is allowed while the obstacle count is at most this (so 16 max)
    pub const SPAWN_CAP: usize = 15;

    /// Explosion animation length in seconds
    pub const ENDING_SECONDS: u32 = 2;

    /// Font size for all HUD and menu text
    pub const TEXT_SIZE: i32 = 20;
}
