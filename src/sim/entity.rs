//! Common view over everything that lives in the scene

use glam::Vec2;
use serde::Serialize;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Player,
    RollingHazard,
    FlyingHazard,
    Particle,
}

/// Position and extent shared by all scene entities
pub trait Entity {
    fn kind(&self) -> EntityKind;
    /// Bottom-left corner of the bounding box
    fn position(&self) -> Vec2;
    /// Bounding box size
    fn extent(&self) -> Vec2;
    /// Cosmetic angle (rotation in degrees, or animation phase)
    fn angle(&self) -> f32 {
        0.0
    }

    fn center(&self) -> Vec2 {
        self.position() + self.extent() / 2.0
    }
}
