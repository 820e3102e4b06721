//! Axis-aligned rectangle overlap
//!
//! Collisions are tested once per tick against post-move positions, so fast
//! movers can tunnel through thin targets. At the game's fixed step that
//! never happens with the shipped sprites.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An integer rectangle in screen space (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    /// True when the two rectangles share interior area.
    ///
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
