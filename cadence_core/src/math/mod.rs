//! Geometry helpers of game engine.

use ultraviolet::Vec2;

/// Axis-aligned rectangle.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    /// Top left corner.
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Creates rectangle from its left, top, right and bottom edges.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(Vec2::new(left, top), Vec2::new(right - left, bottom - top))
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }
}

/// Returns `true` if the circle with given center and radius touches the rectangle.
pub fn has_collision(position: Vec2, radius: f32, bounds: &Rect) -> bool {
    let half_width = bounds.width() / 2.0;
    let half_height = bounds.height() / 2.0;

    let center = bounds.center();
    let dist_x = (position.x - center.x).abs();
    let dist_y = (position.y - center.y).abs();

    if dist_x > half_width + radius || dist_y > half_height + radius {
        return false;
    }
    if dist_x <= half_width || dist_y <= half_height {
        return true;
    }

    let dx = dist_x - half_width;
    let dy = dist_y - half_height;
    dx * dx + dy * dy <= radius * radius
}
