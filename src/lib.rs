//! Balance Beam - A side-scrolling balance beam arcade game
//!
//! Core modules:
//! - `sim`: Simulation (kinematics, collisions, spawning, level transition)
//! - `progress`: Lives, score, level and the persisted best score/unlock
//! - `session`: Owns progress and the live attempt, routes frames
//! - `persistence`: Save data and its storage backends
//! - `platform`: Browser/native platform abstraction
//! - `settings`: User settings (window size, seed, autoplay)
//! - `tuning`: Gameplay constants scaled to the window

pub mod persistence;
pub mod platform;
pub mod progress;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use progress::{LevelSelectError, ProgressState, ProgressTracker};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants, in base design units (700px tall window)
pub mod consts {
    /// Target frame rate of the scheduler
    pub const TARGET_FPS: f32 = 60.0;
    /// Longest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Window height the base units are designed for
    pub const BASE_HEIGHT: f32 = 700.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    pub const PLAYER_RADIUS: f32 = 30.0;
    pub const PLAYER_WALK_SPEED: f32 = 100.0;
    pub const PLAYER_JUMP_FORCE: f32 = 550.0;
    /// Super jump multiplier when hazards are bunched up
    pub const SUPER_JUMP_MULTIPLIER: f32 = 1.5;
    pub const GRAVITY: f32 = -1000.0;
    /// Hit box: horizontal inset as a fraction of player width (each side)
    pub const HITBOX_INSET_FRACTION: f32 = 0.1;
    /// Hit box: band starts this far above the feet
    pub const HITBOX_FOOT_GAP: f32 = 20.0;
    pub const HITBOX_BAND_HEIGHT: f32 = 40.0;
    /// Leg/arm swing rate while walking (radians/sec)
    pub const STRIDE_RATE: f32 = 12.0;

    /// Rolling hazard (bowling ball) defaults
    pub const BALL_RADIUS: f32 = 25.0;
    pub const BALL_SLOW_SPEED: f32 = 140.0;
    pub const BALL_MEDIUM_SPEED: f32 = 200.0;
    pub const BALL_FAST_SPEED: f32 = 280.0;
    /// Cosmetic spin per unit travelled (degrees)
    pub const BALL_SPIN_FACTOR: f32 = 2.0;

    /// Flying hazard (bee) defaults
    pub const BEE_WIDTH: f32 = 40.0;
    pub const BEE_HEIGHT: f32 = 26.0;
    pub const BEE_SPEED: f32 = 180.0;
    /// Collision radius, not scaled with the window
    pub const BEE_HIT_RADIUS: f32 = 15.0;
    pub const BEE_WING_RATE: f32 = 25.0;
    pub const BEE_BOB_SPEED: f32 = 40.0;
    pub const BEE_BOB_LIMIT: f32 = 20.0;
    /// Spawn band: above beam top / below window top
    pub const BEE_MIN_CLEARANCE: f32 = 50.0;
    pub const BEE_MAX_CLEARANCE: f32 = 150.0;

    /// Beam geometry
    pub const BEAM_HEIGHT: f32 = 30.0;
    /// Beam sits at this fraction of the window height
    pub const BEAM_Y_FRACTION: f32 = 0.2;
    pub const BEAM_SIDE_MARGIN: f32 = 20.0;
    /// Player starts this far in from the beam's left end
    pub const START_OFFSET: f32 = 20.0;
    /// Level ends this far before the beam's right end
    pub const FINISH_MARGIN: f32 = 50.0;
    /// Hazards spawn this far past the right edge
    pub const SPAWN_OFFSET: f32 = 10.0;
    /// Hazards are culled once left of this x
    pub const OFFSCREEN_X: f32 = -50.0;

    /// Proximity ranges for the super jump decision
    pub const DANGER_RANGE: f32 = 200.0;
    pub const VERY_CLOSE_RANGE: f32 = 100.0;

    /// Timers (seconds)
    pub const INVINCIBILITY_SECS: f32 = 1.5;
    pub const HIT_BLINK_SECS: f32 = 0.1;
    pub const LANDING_FACE_FRONT_SECS: f32 = 0.4;
    pub const FLIP_UP_FACE_FRONT_SECS: f32 = 0.5;

    /// Level transition choreography
    pub const FLIP_SPIN_RATE: f32 = 540.0;
    pub const FLIP_ARC_HEIGHT: f32 = 60.0;
    /// Floor sits this far below the beam
    pub const FLOOR_DROP: f32 = 60.0;
    pub const TUMBLE_SPEED: f32 = 250.0;
    pub const TUMBLE_SPIN_RATE: f32 = 400.0;
    pub const TUMBLES_PER_SET: u32 = 3;
    pub const TUMBLE_PAUSE_SECS: f32 = 0.5;

    /// Confetti burst
    pub const CONFETTI_COUNT: usize = 60;
    pub const MEDAL_COUNT: usize = 10;
    pub const CONFETTI_GRAVITY: f32 = -400.0;
    pub const PARTICLE_FLOOR_Y: f32 = -50.0;

    /// Progress
    pub const INITIAL_LIVES: u8 = 3;
    pub const POINTS_PER_LEVEL: u64 = 100;
    pub const TOTAL_LEVELS: u8 = 5;
}

/// Wrap an angle in degrees once it passes a full turn, returning whether it wrapped
#[inline]
pub fn wrap_turn(angle: &mut f32) -> bool {
    if *angle >= 360.0 {
        *angle -= 360.0;
        true
    } else {
        false
    }
}
