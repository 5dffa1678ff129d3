//! Gameplay constants scaled to the window
//!
//! The base design targets a 700px tall window. Taller windows scale sizes and
//! speeds up; smaller windows keep base values.

use serde::Serialize;

use crate::Settings;
use crate::consts::*;

/// Scaled gameplay values and beam geometry for one window size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tuning {
    pub scale: f32,
    pub width: f32,
    pub height: f32,

    pub player_width: f32,
    pub player_height: f32,
    pub player_radius: f32,
    pub walk_speed: f32,
    pub jump_force: f32,
    pub gravity: f32,

    pub ball_radius: f32,
    pub ball_slow_speed: f32,
    pub ball_medium_speed: f32,
    pub ball_fast_speed: f32,

    pub bee_width: f32,
    pub bee_height: f32,
    pub bee_speed: f32,

    /// Bottom of the beam
    pub beam_y: f32,
    pub beam_height: f32,
    /// Walking surface
    pub beam_top: f32,
    pub beam_left: f32,
    pub beam_right: f32,
}

/// Scale a base value, truncating toward zero like the base design does
#[inline]
fn scaled(base: f32, scale: f32) -> f32 {
    (base * scale).trunc()
}

impl Tuning {
    /// Derive tuning for a window of the given size
    pub fn new(width: f32, height: f32) -> Self {
        let scale = (height / BASE_HEIGHT).max(1.0);
        let beam_y = (height * BEAM_Y_FRACTION).trunc();
        let beam_height = scaled(BEAM_HEIGHT, scale);

        Self {
            scale,
            width,
            height,
            player_width: scaled(PLAYER_WIDTH, scale),
            player_height: scaled(PLAYER_HEIGHT, scale),
            player_radius: scaled(PLAYER_RADIUS, scale),
            walk_speed: scaled(PLAYER_WALK_SPEED, scale),
            jump_force: scaled(PLAYER_JUMP_FORCE, scale),
            gravity: scaled(GRAVITY, scale),
            ball_radius: scaled(BALL_RADIUS, scale),
            ball_slow_speed: scaled(BALL_SLOW_SPEED, scale),
            ball_medium_speed: scaled(BALL_MEDIUM_SPEED, scale),
            ball_fast_speed: scaled(BALL_FAST_SPEED, scale),
            bee_width: scaled(BEE_WIDTH, scale),
            bee_height: scaled(BEE_HEIGHT, scale),
            bee_speed: scaled(BEE_SPEED, scale),
            beam_y,
            beam_height,
            beam_top: beam_y + beam_height,
            beam_left: BEAM_SIDE_MARGIN,
            beam_right: width - BEAM_SIDE_MARGIN,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.window_width, settings.window_height)
    }

    /// Where the player stands at the start of an attempt
    pub fn start_x(&self) -> f32 {
        self.beam_left + START_OFFSET
    }

    /// Player x at which the level is finished
    pub fn finish_x(&self) -> f32 {
        self.beam_right - FINISH_MARGIN
    }

    /// Floor height the level transition tumbles along
    pub fn floor_y(&self) -> f32 {
        self.beam_y - FLOOR_DROP * self.scale
    }

    /// Hazards enter here
    pub fn spawn_x(&self) -> f32 {
        self.width + SPAWN_OFFSET
    }

    /// Vertical band flying hazards spawn in
    pub fn bee_band(&self) -> (f32, f32) {
        let min = self.beam_top + BEE_MIN_CLEARANCE;
        let max = (self.height - BEE_MAX_CLEARANCE).max(min);
        (min, max)
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_window_is_unscaled() {
        let t = Tuning::new(1000.0, 700.0);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.player_width, 50.0);
        assert_eq!(t.gravity, -1000.0);
        assert_eq!(t.beam_y, 140.0);
        assert_eq!(t.beam_top, 170.0);
        assert_eq!(t.beam_right, 980.0);
        assert_eq!(t.floor_y(), 80.0);
    }

    #[test]
    fn test_small_window_keeps_base_scale() {
        let t = Tuning::new(800.0, 480.0);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.jump_force, 550.0);
    }

    #[test]
    fn test_tall_window_scales_and_truncates() {
        let t = Tuning::new(1920.0, 1050.0);
        assert_eq!(t.scale, 1.5);
        assert_eq!(t.player_height, 120.0);
        assert_eq!(t.ball_radius, 37.0);
        assert_eq!(t.gravity, -1500.0);
    }

    #[test]
    fn test_bee_band_never_inverts() {
        let t = Tuning::new(400.0, 300.0);
        let (min, max) = t.bee_band();
        assert!(max >= min);
    }
}
