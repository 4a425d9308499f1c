use serde::Serialize;

use crate::navigation::Direction;

/// Axis-aligned bounding box in the host's coordinate space.
///
/// Edges follow screen conventions: `top < bottom`, `left < right`, with the
/// y axis growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Bounds {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Build bounds from an origin plus size, the way layout engines report rects.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            top: y,
            right: x + width,
            bottom: y + height,
            left: x,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Length of the shared extent on the axis perpendicular to `direction`.
///
/// Vertical moves compare horizontal extents and vice versa. Non-positive
/// values mean the boxes do not line up.
pub fn overlap(a: &Bounds, b: &Bounds, direction: Direction) -> f64 {
    if direction.is_vertical() {
        a.right.min(b.right) - a.left.max(b.left)
    } else {
        a.bottom.min(b.bottom) - a.top.max(b.top)
    }
}

/// Gap between `from` and `to` measured along `direction`.
pub fn distance(from: &Bounds, to: &Bounds, direction: Direction) -> f64 {
    match direction {
        Direction::Up => from.top - to.bottom,
        Direction::Down => to.top - from.bottom,
        Direction::Left => from.left - to.right,
        Direction::Right => to.left - from.right,
    }
}

/// Whether `to` lies entirely on the `direction` side of `from`.
pub fn lies_beyond(from: &Bounds, to: &Bounds, direction: Direction) -> bool {
    match direction {
        Direction::Up => to.bottom <= from.top,
        Direction::Down => to.top >= from.bottom,
        Direction::Left => to.right <= from.left,
        Direction::Right => to.left >= from.right,
    }
}
