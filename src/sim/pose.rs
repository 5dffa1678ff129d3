//! Per-frame view of the scene for renderers
//!
//! A [`FrameSnapshot`] is everything a presentation layer needs to draw one frame.
//! It is plain data and serializes with serde.

use glam::Vec2;
use serde::Serialize;

use super::entity::{Entity, EntityKind};
use super::particles::Particle;
use super::player::{AnimState, Player};
use super::state::{GamePhase, GameState};
use crate::ProgressState;
use crate::consts::HIT_BLINK_SECS;

/// Opacity of the dimmed half of the hit blink
const BLINK_DIM: f32 = 0.3;

/// How to draw the gymnast
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Pose {
    /// Side view; `stride` is the walk cycle phase in radians
    Walking { stride: f32 },
    FacingFront,
    /// Tucked somersault off or onto the beam
    Tucked { angle: f32 },
    Cartwheel { angle: f32 },
    /// Upright rest between cartwheel sets
    StandingPause,
}

impl Pose {
    pub fn of(player: &Player) -> Self {
        match player.anim {
            AnimState::Walking => Pose::Walking {
                stride: player.stride,
            },
            AnimState::FacingFront { .. } => Pose::FacingFront,
            AnimState::Flipping(arc) | AnimState::FlippingUp(arc) => {
                Pose::Tucked { angle: arc.angle }
            }
            AnimState::FloorTumbling { pause: Some(_), .. } => Pose::StandingPause,
            AnimState::FloorTumbling { angle, .. } => Pose::Cartwheel { angle },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub pose: Pose,
    pub opacity: f32,
}

/// A hazard or other sprite: bounding box plus its cosmetic angle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub angle: f32,
}

impl SpriteView {
    pub fn of(entity: &impl Entity) -> Self {
        Self {
            kind: entity.kind(),
            pos: entity.position(),
            size: entity.extent(),
            angle: entity.angle(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeamView {
    pub left: f32,
    pub right: f32,
    /// Bottom edge
    pub y: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub level: u8,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub hud: Hud,
    pub beam: BeamView,
    pub player: PlayerView,
    /// Balls then bees, each in spawn order
    pub hazards: Vec<SpriteView>,
    pub particles: Vec<Particle>,
}

/// Hit blink: alternates dim and full every blink period while invincible
pub fn blink_opacity(invincibility: f32) -> f32 {
    if invincibility <= 0.0 {
        return 1.0;
    }
    let step = (invincibility / HIT_BLINK_SECS) as u32;
    if step % 2 == 0 { BLINK_DIM } else { 1.0 }
}

pub fn snapshot(state: &GameState, progress: &ProgressState) -> FrameSnapshot {
    let tuning = &state.tuning;
    let player = &state.player;

    let hazards = state
        .balls
        .iter()
        .map(SpriteView::of)
        .chain(state.bees.iter().map(SpriteView::of))
        .collect();

    FrameSnapshot {
        phase: state.phase,
        hud: Hud {
            score: progress.score,
            high_score: progress.high_score,
            lives: progress.lives,
            level: state.level_index(),
        },
        beam: BeamView {
            left: tuning.beam_left,
            right: tuning.beam_right,
            y: tuning.beam_y,
            height: tuning.beam_height,
        },
        player: PlayerView {
            pos: player.pos,
            size: player.size,
            pose: Pose::of(player),
            opacity: blink_opacity(player.invincibility),
        },
        hazards,
        particles: state.particles.clone(),
    }
}
