//! Hazards: rolling bowling balls and bobbing bees

use glam::Vec2;

use super::collision::Circle;
use super::entity::{Entity, EntityKind};
use crate::consts::*;

/// A bowling ball rolling left along the beam
#[derive(Debug, Clone, PartialEq)]
pub struct RollingHazard {
    pub id: u32,
    /// Bottom-left corner of the bounding box
    pub pos: Vec2,
    pub radius: f32,
    /// Leftward speed (pixels/sec)
    pub speed: f32,
    /// Cosmetic spin (degrees)
    pub rotation: f32,
}

impl RollingHazard {
    pub fn new(id: u32, pos: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            id,
            pos,
            radius,
            speed,
            rotation: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.x -= self.speed * dt;
        self.rotation -= self.speed * dt * BALL_SPIN_FACTOR;
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }

    pub fn collider(&self) -> Circle {
        Circle::new(self.center(), self.radius)
    }

    pub fn is_offscreen(&self) -> bool {
        self.pos.x < OFFSCREEN_X
    }
}

impl Entity for RollingHazard {
    fn kind(&self) -> EntityKind {
        EntityKind::RollingHazard
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn extent(&self) -> Vec2 {
        Vec2::splat(self.radius * 2.0)
    }

    fn angle(&self) -> f32 {
        self.rotation
    }
}

/// A bee flying left with a zigzag bob
#[derive(Debug, Clone, PartialEq)]
pub struct FlyingHazard {
    pub id: u32,
    /// Bottom-left corner of the bounding box
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Cosmetic wing flap phase (radians)
    pub wing_phase: f32,
    /// Accumulated bob displacement, compared against the bob limit
    pub bob_offset: f32,
    /// +1 rising, -1 sinking
    pub bob_direction: f32,
}

impl FlyingHazard {
    pub fn new(id: u32, pos: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            id,
            pos,
            size,
            speed,
            wing_phase: 0.0,
            bob_offset: 0.0,
            bob_direction: 1.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.x -= self.speed * dt;
        self.wing_phase += dt * BEE_WING_RATE;

        // The position follows the direction *after* the flip, so the path is a
        // zigzag rather than a sine
        self.bob_offset += self.bob_direction * dt * BEE_BOB_SPEED;
        if self.bob_offset.abs() > BEE_BOB_LIMIT {
            self.bob_direction = -self.bob_direction;
        }
        self.pos.y += self.bob_direction * dt * BEE_BOB_SPEED;
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn collider(&self) -> Circle {
        Circle::new(self.center(), BEE_HIT_RADIUS)
    }

    pub fn is_offscreen(&self) -> bool {
        self.pos.x < OFFSCREEN_X
    }
}

impl Entity for FlyingHazard {
    fn kind(&self) -> EntityKind {
        EntityKind::FlyingHazard
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn extent(&self) -> Vec2 {
        self.size
    }

    fn angle(&self) -> f32 {
        self.wing_phase
    }
}

/// Decide whether a jump needs the super boost.
///
/// Hazards count only when ahead of the player. A super jump is granted when
/// both a ball and a bee are within the danger range, or when anything is very
/// close.
pub fn needs_super_jump(
    player_x: f32,
    rolling: &[RollingHazard],
    flying: &[FlyingHazard],
) -> bool {
    let (ball_close, ball_very_close) = proximity(player_x, rolling.iter().map(|b| b.pos.x));
    let (bee_close, bee_very_close) = proximity(player_x, flying.iter().map(|b| b.pos.x));

    (ball_close && bee_close) || ball_very_close || bee_very_close
}

/// (anything within danger range, anything very close) for hazards ahead
fn proximity(player_x: f32, xs: impl Iterator<Item = f32>) -> (bool, bool) {
    let mut close = false;
    let mut very_close = false;
    for x in xs {
        let dist = x - player_x;
        if dist > 0.0 && dist < DANGER_RANGE {
            close = true;
            very_close |= dist < VERY_CLOSE_RANGE;
        }
    }
    (close, very_close)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f32) -> RollingHazard {
        RollingHazard::new(1, Vec2::new(x, 170.0), BALL_RADIUS, BALL_SLOW_SPEED)
    }

    fn bee_at(x: f32) -> FlyingHazard {
        FlyingHazard::new(
            2,
            Vec2::new(x, 300.0),
            Vec2::new(BEE_WIDTH + 20.0, BEE_HEIGHT + 25.0),
            BEE_SPEED,
        )
    }

    #[test]
    fn test_rolling_moves_left_and_spins() {
        let mut ball = ball_at(500.0);
        ball.update(0.5);
        assert_eq!(ball.pos.x, 430.0);
        assert_eq!(ball.rotation, -140.0);
        assert_eq!(ball.pos.y, 170.0);
    }

    #[test]
    fn test_rolling_culled_past_left_edge() {
        let mut ball = ball_at(-40.0);
        assert!(!ball.is_offscreen());
        ball.update(0.1);
        assert!(ball.is_offscreen());
    }

    #[test]
    fn test_bee_zigzags_within_bounds() {
        let mut bee = bee_at(800.0);
        let start_y = bee.pos.y;
        let dt = 1.0 / 60.0;
        let mut min_y = start_y;
        let mut max_y = start_y;
        let mut flips = 0;
        let mut last_dir = bee.bob_direction;
        for _ in 0..600 {
            bee.update(dt);
            min_y = min_y.min(bee.pos.y);
            max_y = max_y.max(bee.pos.y);
            if bee.bob_direction != last_dir {
                flips += 1;
                last_dir = bee.bob_direction;
            }
        }
        assert!(flips >= 4, "bee should bob back and forth, flipped {flips} times");
        // Roughly the bob limit either side, never runaway
        assert!(max_y - start_y < BEE_BOB_LIMIT + 5.0);
        assert!(start_y - min_y < BEE_BOB_LIMIT + 5.0);
        assert!(bee.wing_phase > 0.0);
    }

    #[test]
    fn test_super_jump_when_single_hazard_very_close() {
        assert!(needs_super_jump(100.0, &[ball_at(180.0)], &[]));
    }

    #[test]
    fn test_super_jump_when_ball_and_bee_close() {
        assert!(needs_super_jump(100.0, &[ball_at(250.0)], &[bee_at(290.0)]));
    }

    #[test]
    fn test_normal_jump_for_single_close_hazard() {
        assert!(!needs_super_jump(100.0, &[ball_at(250.0)], &[]));
        assert!(!needs_super_jump(100.0, &[], &[bee_at(250.0)]));
    }

    #[test]
    fn test_hazards_behind_player_are_ignored() {
        assert!(!needs_super_jump(100.0, &[ball_at(50.0)], &[bee_at(90.0)]));
        assert!(!needs_super_jump(100.0, &[ball_at(100.0)], &[]));
    }

    #[test]
    fn test_two_close_balls_are_not_enough() {
        assert!(!needs_super_jump(
            100.0,
            &[ball_at(250.0), ball_at(280.0)],
            &[]
        ));
    }
}
