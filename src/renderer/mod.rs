//! Frame composition
//!
//! Decides what to draw each frame as an ordered list of draw commands. The
//! platform turns them into pixels.

pub mod scene;
pub mod text;

pub use scene::compose;

use crate::sim::Sprite;

/// Images the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Image {
    Background,
    Sprite(Sprite),
}

/// A single drawing instruction, executed in list order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(colors::Color),
    Image {
        image: Image,
        x: i32,
        y: i32,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        size: i32,
        color: colors::Color,
    },
}

/// Colors for game elements
pub mod colors {
    /// Linear RGBA, 0.0 - 1.0
    pub type Color = [f32; 4];

    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const HIGH_SCORE: Color = [0.784, 0.784, 0.784, 1.0];
    pub const GAME_OVER: Color = [0.902, 0.161, 0.216, 1.0];
}
