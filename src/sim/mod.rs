//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per frame
//! - Seeded RNG only
//! - Stable iteration order (obstacle slot order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod screen;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use screen::{Screen, ScreenEvent};
pub use state::{Entity, GameEvent, GameSession, GameState, Rules, Sprite};
pub use tick::{TickInput, tick, wrap_vertical};
