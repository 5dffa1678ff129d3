//! Level transition choreography
//!
//! When the player reaches the finish, the gymnast flips off the beam to the
//! floor, cartwheels back toward the start in sets of three, and flips back up
//! onto the beam. The animation payload lives in [`AnimState`]; the
//! choreographer holds the targets and reports completion exactly once.

use serde::Serialize;

use super::player::{AnimState, FlipArc, Player};
use crate::consts::*;
use crate::{Tuning, wrap_turn};

/// Which part of the routine is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransitionStage {
    FlipDown,
    FloorTumble,
    FlipUp,
    Done,
}

/// Drives the flip-down, tumble, flip-up routine
#[derive(Debug, Clone, PartialEq)]
pub struct Choreographer {
    floor_y: f32,
    beam_top: f32,
    target_x: f32,
    arc_height: f32,
    tumble_speed: f32,
    finished: bool,
}

impl Choreographer {
    /// Start the routine from the player's current position
    pub fn begin(player: &mut Player, tuning: &Tuning) -> Self {
        let choreo = Self {
            floor_y: tuning.floor_y(),
            beam_top: tuning.beam_top,
            target_x: tuning.start_x(),
            arc_height: FLIP_ARC_HEIGHT * tuning.scale,
            tumble_speed: TUMBLE_SPEED * tuning.scale,
            finished: false,
        };

        player.vel_y = 0.0;
        player.jumping = false;
        player.on_ground = false;
        player.anim = AnimState::Flipping(FlipArc::new(player.pos.y, choreo.floor_y));
        log::debug!("Transition: flip down from y={:.1}", player.pos.y);
        choreo
    }

    pub fn stage(&self, player: &Player) -> TransitionStage {
        if self.finished {
            return TransitionStage::Done;
        }
        match player.anim {
            AnimState::Flipping(_) => TransitionStage::FlipDown,
            AnimState::FloorTumbling { .. } => TransitionStage::FloorTumble,
            AnimState::FlippingUp(_) => TransitionStage::FlipUp,
            AnimState::Walking | AnimState::FacingFront { .. } => TransitionStage::Done,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance the routine. Returns true on the frame it completes, never again.
    pub fn update(&mut self, player: &mut Player, dt: f32) -> bool {
        if self.finished {
            return false;
        }

        let mut next = None;
        match &mut player.anim {
            AnimState::Flipping(arc) => {
                if arc.advance(dt, FLIP_SPIN_RATE) {
                    player.pos.y = self.floor_y;
                    next = Some(AnimState::FloorTumbling {
                        angle: 0.0,
                        flip_count: 0,
                        pause: None,
                        target_x: self.target_x,
                    });
                    log::debug!("Transition: tumbling toward x={:.1}", self.target_x);
                } else {
                    player.pos.y = arc.y(self.arc_height);
                }
            }
            AnimState::FloorTumbling {
                angle,
                flip_count,
                pause,
                target_x,
            } => {
                if let Some(remaining) = *pause {
                    // Upright while paused
                    *angle = 0.0;
                    let remaining = remaining - dt;
                    if remaining <= 0.0 {
                        *pause = None;
                        *flip_count = 0;
                    } else {
                        *pause = Some(remaining);
                    }
                    return false;
                }

                player.pos.x -= self.tumble_speed * dt;
                *angle += TUMBLE_SPIN_RATE * dt;
                if wrap_turn(angle) {
                    *flip_count += 1;
                    if *flip_count >= TUMBLES_PER_SET {
                        *pause = Some(TUMBLE_PAUSE_SECS);
                        *angle = 0.0;
                    }
                }

                if player.pos.x <= *target_x {
                    player.pos.x = *target_x;
                    next = Some(AnimState::FlippingUp(FlipArc::new(
                        player.pos.y,
                        self.beam_top,
                    )));
                    log::debug!("Transition: flip up to y={:.1}", self.beam_top);
                }
            }
            AnimState::FlippingUp(arc) => {
                if arc.advance(dt, FLIP_SPIN_RATE) {
                    player.pos.y = self.beam_top;
                    player.on_ground = true;
                    next = Some(AnimState::FacingFront {
                        timer: FLIP_UP_FACE_FRONT_SECS,
                    });
                    self.finished = true;
                } else {
                    player.pos.y = arc.y(self.arc_height);
                }
            }
            AnimState::Walking | AnimState::FacingFront { .. } => {}
        }

        if let Some(anim) = next {
            player.anim = anim;
        }
        self.finished
    }
}
