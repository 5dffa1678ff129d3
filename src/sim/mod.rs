//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Variable timestep in, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod hazard;
pub mod level;
pub mod particles;
pub mod player;
pub mod pose;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod transition;

pub use collision::{Circle, Rect, circle_rect_overlap, circles_overlap};
pub use entity::{Entity, EntityKind};
pub use hazard::{FlyingHazard, RollingHazard, needs_super_jump};
pub use level::{LEVELS, LevelConfig, SpeedTier};
pub use particles::{Particle, ParticleKind};
pub use player::{AnimState, FlipArc, Player};
pub use pose::{FrameSnapshot, Pose, snapshot};
pub use spawn::{SpawnTrack, Spawner};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use transition::{Choreographer, TransitionStage};
