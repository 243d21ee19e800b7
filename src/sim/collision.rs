//! Axis-aligned collision detection
//!
//! Every entity in the game is a box. Collision only cares about the box,
//! so anything exposing `Bounds` can be tested against anything else.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, positioned by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal center
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    /// True if the two boxes share a region of non-zero area.
    /// Touching edges do not count.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Anything with an axis-aligned bounding box
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Check collision between two boxed entities
#[inline]
pub fn overlaps(a: &impl Bounds, b: &impl Bounds) -> bool {
    a.bounds().overlaps(&b.bounds())
}
