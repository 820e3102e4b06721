//! High score tracking
//!
//! Lives for the process only; nothing is written to disk.

use serde::{Deserialize, Serialize};

use crate::sim::Screen;

/// Best score seen this process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Current best (0 until a game finishes with a positive score)
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score would replace the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Offer a finished game's score. Returns true if it became the new best.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// The HUD shows the best score once there is one, except on the main menu
    pub fn visible_on(&self, screen: Screen) -> bool {
        self.best > 0 && screen != Screen::MainMenu
    }
}
