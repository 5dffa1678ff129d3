//! Collision detection
//!
//! Pure geometric tests between the player and hazards. Contact is strict: shapes
//! that only touch do not collide.

use glam::Vec2;

/// A circle collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// An axis-aligned rectangle collider (origin at the bottom-left corner)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Point inside (or on the edge of) the rectangle closest to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max())
    }
}

/// Circle-circle overlap
#[inline]
pub fn circles_overlap(a: Circle, b: Circle) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}

/// Circle-rectangle overlap
#[inline]
pub fn circle_rect_overlap(circle: Circle, rect: Rect) -> bool {
    let closest = rect.closest_point(circle.center);
    circle.center.distance(closest) < circle.radius
}
