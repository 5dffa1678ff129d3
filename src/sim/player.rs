//! The gymnast: walking, jumping and animation state

use glam::Vec2;
use serde::Serialize;

use super::collision::{Circle, Rect};
use super::entity::{Entity, EntityKind};
use crate::Tuning;
use crate::consts::*;

/// One full rotation along an arc between two heights
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlipArc {
    /// Rotation so far (degrees, 0..=360)
    pub angle: f32,
    pub start_y: f32,
    pub target_y: f32,
}

impl FlipArc {
    pub fn new(start_y: f32, target_y: f32) -> Self {
        Self {
            angle: 0.0,
            start_y,
            target_y,
        }
    }

    /// Fraction of the rotation completed
    pub fn progress(&self) -> f32 {
        (self.angle / 360.0).clamp(0.0, 1.0)
    }

    /// Height along the arc: linear travel plus a half-sine hump
    pub fn y(&self, arc_height: f32) -> f32 {
        let p = self.progress();
        let lift = (p * std::f32::consts::PI).sin() * arc_height;
        self.start_y + (self.target_y - self.start_y) * p + lift
    }

    /// Spin forward; returns true once the rotation is complete
    pub fn advance(&mut self, dt: f32, spin_rate: f32) -> bool {
        self.angle += spin_rate * dt;
        if self.angle >= 360.0 {
            self.angle = 360.0;
            true
        } else {
            false
        }
    }
}

/// What the gymnast is doing. Only one transition animation can be active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AnimState {
    /// Side view, walking or mid-jump
    Walking,
    /// Facing the camera for a moment after landing
    FacingFront { timer: f32 },
    /// Flip from the beam down to the floor
    Flipping(FlipArc),
    /// Cartwheels along the floor back toward the start
    FloorTumbling {
        angle: f32,
        flip_count: u32,
        /// Remaining upright pause between sets
        pause: Option<f32>,
        target_x: f32,
    },
    /// Flip from the floor back up onto the beam
    FlippingUp(FlipArc),
}

impl AnimState {
    /// True while the level transition owns the player
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            AnimState::Flipping(_) | AnimState::FloorTumbling { .. } | AnimState::FlippingUp(_)
        )
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Bottom-left corner (feet)
    pub pos: Vec2,
    pub size: Vec2,
    /// Radius of the body circle used against bees
    pub radius: f32,
    pub vel_y: f32,
    pub on_ground: bool,
    pub jumping: bool,
    /// Seconds of invincibility left
    pub invincibility: f32,
    /// Walk cycle phase (radians)
    pub stride: f32,
    pub anim: AnimState,
}

impl Player {
    pub fn new(tuning: &Tuning, pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            radius: tuning.player_radius,
            vel_y: 0.0,
            on_ground: true,
            jumping: false,
            invincibility: 0.0,
            stride: 0.0,
            anim: AnimState::Walking,
        }
    }

    /// Put the player back at `pos`, standing, keeping invincibility
    pub fn reset_to(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel_y = 0.0;
        self.jumping = false;
        self.on_ground = true;
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility > 0.0
    }

    pub fn tick_invincibility(&mut self, dt: f32) {
        if self.invincibility > 0.0 {
            self.invincibility = (self.invincibility - dt).max(0.0);
        }
    }

    /// Start a jump if standing; returns whether the jump happened
    pub fn jump(&mut self, jump_force: f32, super_jump: bool) -> bool {
        if !self.on_ground || self.jumping {
            return false;
        }
        self.jumping = true;
        self.on_ground = false;
        self.vel_y = if super_jump {
            jump_force * SUPER_JUMP_MULTIPLIER
        } else {
            jump_force
        };
        true
    }

    /// Advance pose timers, the walk cycle and jump physics
    pub fn update(&mut self, dt: f32, ground_y: f32, gravity: f32) {
        if let AnimState::FacingFront { timer } = &mut self.anim {
            *timer -= dt;
            if *timer <= 0.0 {
                self.anim = AnimState::Walking;
            }
        }

        if !self.jumping && self.anim == AnimState::Walking {
            self.stride += dt * STRIDE_RATE;
        }

        if self.jumping {
            self.vel_y += gravity * dt;
            self.pos.y += self.vel_y * dt;

            if self.pos.y <= ground_y && self.vel_y < 0.0 {
                self.pos.y = ground_y;
                self.vel_y = 0.0;
                self.jumping = false;
                self.on_ground = true;
                self.anim = AnimState::FacingFront {
                    timer: LANDING_FACE_FRONT_SECS,
                };
            }
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Body hit box: inset from the sides, a band starting above the feet
    pub fn hitbox(&self, scale: f32) -> Rect {
        let inset = self.size.x * HITBOX_INSET_FRACTION;
        Rect::new(
            self.pos.x + inset,
            self.pos.y + HITBOX_FOOT_GAP * scale,
            self.size.x - inset * 2.0,
            HITBOX_BAND_HEIGHT * scale,
        )
    }

    /// Body circle used against flying hazards
    pub fn body_circle(&self) -> Circle {
        Circle::new(self.center(), self.radius)
    }
}

impl Entity for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn extent(&self) -> Vec2 {
        self.size
    }

    fn angle(&self) -> f32 {
        match self.anim {
            AnimState::Flipping(arc) | AnimState::FlippingUp(arc) => arc.angle,
            AnimState::FloorTumbling { angle, .. } => angle,
            AnimState::Walking | AnimState::FacingFront { .. } => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GROUND: f32 = 170.0;

    fn player() -> Player {
        let tuning = Tuning::new(1000.0, 700.0);
        Player::new(&tuning, Vec2::new(40.0, GROUND))
    }

    /// Run until landed, returning elapsed time
    fn run_jump(player: &mut Player, steps: &[f32]) -> f32 {
        let mut t = 0.0;
        for &dt in steps.iter().cycle() {
            player.update(dt, GROUND, GRAVITY);
            t += dt;
            if !player.jumping || t > 10.0 {
                break;
            }
        }
        t
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut p = player();
        assert!(p.jump(PLAYER_JUMP_FORCE, false));
        assert_eq!(p.vel_y, PLAYER_JUMP_FORCE);
        assert!(!p.jump(PLAYER_JUMP_FORCE, true));
        assert_eq!(p.vel_y, PLAYER_JUMP_FORCE);
    }

    #[test]
    fn test_super_jump_multiplier() {
        let mut p = player();
        assert!(p.jump(PLAYER_JUMP_FORCE, true));
        assert_eq!(p.vel_y, PLAYER_JUMP_FORCE * 1.5);
    }

    #[test]
    fn test_landing_faces_front_then_walks() {
        let mut p = player();
        p.jump(PLAYER_JUMP_FORCE, false);
        let t = run_jump(&mut p, &[1.0 / 60.0]);
        // Airtime is 2v/g = 1.1s
        assert!((t - 1.1).abs() < 0.05, "airtime {t}");
        assert_eq!(p.pos.y, GROUND);
        assert!(p.on_ground);
        assert_eq!(p.vel_y, 0.0);
        assert!(matches!(p.anim, AnimState::FacingFront { .. }));

        for _ in 0..30 {
            p.update(1.0 / 60.0, GROUND, GRAVITY);
        }
        assert_eq!(p.anim, AnimState::Walking);
    }

    #[test]
    fn test_stride_only_advances_when_walking() {
        let mut p = player();
        p.update(0.5, GROUND, GRAVITY);
        assert_eq!(p.stride, 6.0);
        p.jump(PLAYER_JUMP_FORCE, false);
        p.update(0.1, GROUND, GRAVITY);
        assert_eq!(p.stride, 6.0);
    }

    #[test]
    fn test_hitbox_inset() {
        let p = player();
        let hb = p.hitbox(1.0);
        assert_eq!(hb.min, Vec2::new(45.0, GROUND + 20.0));
        assert_eq!(hb.size, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn test_invincibility_counts_down() {
        let mut p = player();
        p.invincibility = INVINCIBILITY_SECS;
        assert!(p.is_invincible());
        for _ in 0..100 {
            p.tick_invincibility(1.0 / 60.0);
        }
        assert!(!p.is_invincible());
        assert_eq!(p.invincibility, 0.0);
    }

    #[test]
    fn test_flip_arc_endpoints() {
        let mut arc = FlipArc::new(170.0, 80.0);
        assert_eq!(arc.y(60.0), 170.0);
        arc.angle = 180.0;
        assert!((arc.y(60.0) - (125.0 + 60.0)).abs() < 1e-3);
        assert!(arc.advance(1.0, 540.0));
        assert_eq!(arc.angle, 360.0);
        assert!((arc.y(60.0) - 80.0).abs() < 1e-3);
    }

    proptest! {
        /// However the frame time is chunked, a full jump lands back on the beam
        #[test]
        fn prop_landing_independent_of_chunking(
            steps in prop::collection::vec(0.004f32..0.05, 1..16),
            super_jump in any::<bool>(),
        ) {
            let mut p = player();
            p.jump(PLAYER_JUMP_FORCE, super_jump);
            run_jump(&mut p, &steps);
            prop_assert!(!p.jumping);
            prop_assert_eq!(p.pos.y, GROUND);
            prop_assert_eq!(p.vel_y, 0.0);
        }
    }
}
