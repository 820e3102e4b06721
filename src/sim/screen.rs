//! Screen state machine
//!
//! MainMenu -> GamePlay -> GameEnding -> GameOver -> GamePlay (restart).

use serde::{Deserialize, Serialize};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    /// Title screen, waiting for confirm
    #[default]
    MainMenu,
    /// Active gameplay
    GamePlay,
    /// Explosion animation after a collision
    GameEnding,
    /// Final score shown, waiting for confirm to restart
    GameOver,
}

/// Something that may move the state machine forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Confirm control newly pressed
    Confirm,
    /// Player overlapped an obstacle
    Collision,
    /// The explosion animation ran its full length
    EndingElapsed,
}

impl Screen {
    /// Apply an event. Events with no meaning for the current screen are ignored.
    pub fn on(self, event: ScreenEvent) -> Screen {
        match (self, event) {
            (Screen::MainMenu, ScreenEvent::Confirm) => Screen::GamePlay,
            (Screen::GamePlay, ScreenEvent::Collision) => Screen::GameEnding,
            (Screen::GameEnding, ScreenEvent::EndingElapsed) => Screen::GameOver,
            (Screen::GameOver, ScreenEvent::Confirm) => Screen::GamePlay,
            (screen, _) => screen,
        }
    }

    /// Whether the player and obstacles are on screen
    pub fn shows_entities(self) -> bool {
        matches!(self, Screen::GamePlay | Screen::GameEnding)
    }
}
