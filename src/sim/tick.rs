//! Per-frame simulation tick
//!
//! Core game loop: walk, jump, spawn, move hazards, resolve hits, and hand the
//! player to the level transition once the finish is reached.

use super::collision::{circle_rect_overlap, circles_overlap};
use super::hazard::needs_super_jump;
use super::particles;
use super::state::{GameEvent, GamePhase, GameState};
use super::transition::Choreographer;
use crate::ProgressTracker;
use crate::consts::*;

/// Seconds of look-ahead the autopilot leaves before a ball arrives
const AUTOPILOT_LEAD_SECS: f32 = 0.55;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump requested (tap/click/space)
    pub jump: bool,
    /// Idle/demo mode - the autopilot decides when to jump
    pub idle_mode: bool,
}

/// Advance the attempt by `dt` seconds of wall-clock time
pub fn tick(state: &mut GameState, progress: &mut ProgressTracker, input: &TickInput, dt: f32) {
    // Celebration keeps animating whatever the phase
    if !state.particles.is_empty() {
        state.particles.retain_mut(|p| p.update(dt));
    }

    match state.phase {
        GamePhase::Playing => play(state, progress, input, dt),
        GamePhase::Transition => run_transition(state, progress, dt),
        GamePhase::LevelComplete | GamePhase::GameOver => {}
    }
}

fn play(state: &mut GameState, progress: &mut ProgressTracker, input: &TickInput, dt: f32) {
    state.elapsed += dt;
    state.player.tick_invincibility(dt);

    let wants_jump = input.jump || (input.idle_mode && autopilot_wants_jump(state));
    if wants_jump {
        let super_jump = needs_super_jump(state.player.pos.x, &state.balls, &state.bees);
        if state.player.jump(state.tuning.jump_force, super_jump) && super_jump {
            log::debug!("Super jump at x={:.1}", state.player.pos.x);
        }
    }

    // Walk and fall
    state.player.pos.x += state.tuning.walk_speed * dt;
    state
        .player
        .update(dt, state.tuning.beam_top, state.tuning.gravity);

    if state.player.pos.x >= state.tuning.finish_x() {
        begin_transition(state);
        return;
    }

    let (spawn_ball, spawn_bee) = state.spawner.tick(dt);
    if spawn_ball {
        state.spawn_ball();
    }
    if spawn_bee {
        state.spawn_bee();
    }

    let invincible = state.player.is_invincible();

    // Rolling hazards against the body rectangle
    let hitbox = state.player.hitbox(state.tuning.scale);
    let mut hit = false;
    state.balls.retain_mut(|ball| {
        ball.update(dt);
        if ball.is_offscreen() {
            return false;
        }
        if !invincible && !hit && circle_rect_overlap(ball.collider(), hitbox) {
            hit = true;
            return false;
        }
        true
    });
    if hit {
        player_hit(state, progress);
        return;
    }

    // Flying hazards against the body circle
    let body = state.player.body_circle();
    state.bees.retain_mut(|bee| {
        bee.update(dt);
        if bee.is_offscreen() {
            return false;
        }
        if !invincible && !hit && circles_overlap(bee.collider(), body) {
            hit = true;
            return false;
        }
        true
    });
    if hit {
        player_hit(state, progress);
    }
}

/// Jump when a ball is about to reach the player, or a low bee is close
fn autopilot_wants_jump(state: &GameState) -> bool {
    let player = &state.player;
    let lead = |speed: f32| (speed + state.tuning.walk_speed) * AUTOPILOT_LEAD_SECS;
    let body = player.body_circle();
    let reach = body.radius + BEE_HIT_RADIUS + BEE_BOB_LIMIT;

    let ball_due = state.balls.iter().any(|b| {
        let dist = b.pos.x - player.pos.x;
        dist > 0.0 && dist < lead(b.speed)
    });
    let bee_due = state.bees.iter().any(|b| {
        let dist = b.pos.x - player.pos.x;
        dist > 0.0 && dist < lead(b.speed) && b.center().y - body.center.y < reach
    });
    ball_due || bee_due
}

fn player_hit(state: &mut GameState, progress: &mut ProgressTracker) {
    state.player.invincibility = INVINCIBILITY_SECS;
    state.emit(GameEvent::HitFlash);

    let still_alive = progress.lose_life();
    state.emit(GameEvent::LivesChanged {
        lives: progress.lives(),
    });
    log::info!(
        "Hit on level {} at x={:.1}, {} lives left",
        state.level_index(),
        state.player.pos.x,
        progress.lives()
    );

    if still_alive {
        state.reset_attempt();
    } else {
        state.phase = GamePhase::GameOver;
        state.emit(GameEvent::GameOver);
        log::info!("Game over with score {}", progress.score());
    }
}

fn begin_transition(state: &mut GameState) {
    log::info!(
        "Level {} finished after {:.1}s",
        state.level_index(),
        state.elapsed
    );
    state.phase = GamePhase::Transition;
    state.transition = Some(Choreographer::begin(&mut state.player, &state.tuning));
}

fn run_transition(state: &mut GameState, progress: &mut ProgressTracker, dt: f32) {
    let Some(choreo) = state.transition.as_mut() else {
        return;
    };
    if choreo.update(&mut state.player, dt) {
        finish_level(state, progress);
    }
}

fn finish_level(state: &mut GameState, progress: &mut ProgressTracker) {
    state.transition = None;

    let done = progress.complete_level();
    if let Some(next) = done.unlocked {
        log::info!("Unlocked level {next}");
    }
    state.emit(GameEvent::ScoreChanged {
        score: progress.score(),
    });

    state.phase = GamePhase::LevelComplete;
    state.emit(GameEvent::LevelComplete {
        level: done.level,
        final_level: done.final_level,
    });

    let tuning = state.tuning.clone();
    let burst = particles::burst(state.rng(), &tuning);
    let count = burst.len();
    state.particles.extend(burst);
    state.emit(GameEvent::ConfettiBurst { count });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::persistence::MemoryStore;
    use crate::sim::hazard::RollingHazard;
    use crate::sim::level::LevelConfig;
    use crate::sim::player::AnimState;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn setup(level: u8) -> (GameState, ProgressTracker) {
        let progress = ProgressTracker::load(Box::new(MemoryStore::new()));
        let state = GameState::new(
            Tuning::new(1000.0, 700.0),
            LevelConfig::for_level(level),
            99,
        );
        (state, progress)
    }

    /// A ball sitting right on top of the player
    fn ball_on_player(state: &GameState) -> RollingHazard {
        let pos = state.player.pos;
        RollingHazard::new(999, pos, state.tuning.ball_radius, 0.0)
    }

    fn run(state: &mut GameState, progress: &mut ProgressTracker, secs: f32) {
        let input = TickInput::default();
        for _ in 0..(secs / DT).round() as u32 {
            tick(state, progress, &input, DT);
        }
    }

    #[test]
    fn test_walks_right() {
        let (mut state, mut progress) = setup(1);
        let x0 = state.player.pos.x;
        tick(&mut state, &mut progress, &TickInput::default(), 0.5);
        assert_eq!(state.player.pos.x, x0 + 50.0);
    }

    #[test]
    fn test_jump_input() {
        let (mut state, mut progress) = setup(1);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &mut progress, &jump, DT);
        assert!(state.player.jumping);
        assert!(state.player.pos.y > state.tuning.beam_top);
    }

    #[test]
    fn test_super_jump_granted_when_ball_very_close() {
        let (mut state, mut progress) = setup(1);
        let mut ball = ball_on_player(&state);
        ball.pos.x += 80.0;
        state.balls.push(ball);
        state.player.invincibility = 10.0;
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &mut progress, &jump, DT);
        let expected = (state.tuning.jump_force * SUPER_JUMP_MULTIPLIER) + state.tuning.gravity * DT;
        assert!((state.player.vel_y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_hit_costs_life_and_restarts_attempt() {
        let (mut state, mut progress) = setup(1);
        run(&mut state, &mut progress, 1.0);
        state.spawn_bee();
        let ball = ball_on_player(&state);
        state.balls.push(ball);

        tick(&mut state, &mut progress, &TickInput::default(), DT);

        assert_eq!(progress.lives(), 2);
        assert!(state.player.is_invincible());
        assert_eq!(state.player.pos.x, state.tuning.start_x());
        assert!(state.balls.is_empty() && state.bees.is_empty());
        assert_eq!(state.spawner.rolling.spawned, 0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::HitFlash, GameEvent::LivesChanged { lives: 2 }]
        );
    }

    #[test]
    fn test_invincible_player_passes_through() {
        let (mut state, mut progress) = setup(1);
        state.player.invincibility = 1.0;
        let ball = ball_on_player(&state);
        state.balls.push(ball);
        tick(&mut state, &mut progress, &TickInput::default(), DT);
        assert_eq!(progress.lives(), 3);
        assert_eq!(state.balls.len(), 1);
    }

    #[test]
    fn test_invincibility_expires() {
        let (mut state, mut progress) = setup(1);
        state.player.invincibility = INVINCIBILITY_SECS;
        run(&mut state, &mut progress, INVINCIBILITY_SECS + 0.1);
        assert!(!state.player.is_invincible());
    }

    #[test]
    fn test_bee_hit_uses_body_circle() {
        let (mut state, mut progress) = setup(1);
        state.spawn_bee();
        let center = state.player.center();
        let bee = &mut state.bees[0];
        bee.pos = center - bee.size / 2.0;
        bee.speed = 0.0;
        tick(&mut state, &mut progress, &TickInput::default(), DT);
        assert_eq!(progress.lives(), 2);
    }

    #[test]
    fn test_last_life_ends_game() {
        let (mut state, mut progress) = setup(1);
        progress.lose_life();
        progress.lose_life();
        let ball = ball_on_player(&state);
        state.balls.push(ball);
        tick(&mut state, &mut progress, &TickInput::default(), DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(progress.lives(), 0);
        assert!(state.drain_events().contains(&GameEvent::GameOver));

        // Frozen afterwards
        let x = state.player.pos.x;
        run(&mut state, &mut progress, 1.0);
        assert_eq!(state.player.pos.x, x);
    }

    #[test]
    fn test_offscreen_hazards_culled() {
        let (mut state, mut progress) = setup(1);
        let mut ball = ball_on_player(&state);
        ball.pos = Vec2::new(OFFSCREEN_X + 1.0, state.tuning.beam_top);
        ball.speed = 100.0;
        state.balls.push(ball);
        tick(&mut state, &mut progress, &TickInput::default(), 0.05);
        assert!(state.balls.is_empty());
        assert_eq!(progress.lives(), 3);
    }

    #[test]
    fn test_finish_hands_off_to_transition() {
        let (mut state, mut progress) = setup(1);
        state.player.pos.x = state.tuning.finish_x() - 0.5;
        tick(&mut state, &mut progress, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Transition);
        assert!(state.transition.is_some());
        assert!(matches!(state.player.anim, AnimState::Flipping(_)));
    }

    #[test]
    fn test_level_completion_after_transition() {
        let (mut state, mut progress) = setup(1);
        state.player.pos.x = state.tuning.finish_x();
        run(&mut state, &mut progress, 20.0);

        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(state.transition.is_none());
        assert_eq!(state.player.pos.y, state.tuning.beam_top);
        assert_eq!(progress.score(), POINTS_PER_LEVEL);
        assert_eq!(progress.highest_unlocked_level(), 2);

        let events = state.drain_events();
        let completions = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelComplete { .. }))
            .count();
        assert_eq!(completions, 1);
        assert!(events.contains(&GameEvent::LevelComplete {
            level: 1,
            final_level: false
        }));
        assert!(events.contains(&GameEvent::ScoreChanged {
            score: POINTS_PER_LEVEL
        }));
    }

    #[test]
    fn test_confetti_spawns_and_clears() {
        let (mut state, mut progress) = setup(1);
        state.player.pos.x = state.tuning.finish_x();
        while state.phase != GamePhase::LevelComplete {
            tick(&mut state, &mut progress, &TickInput::default(), DT);
        }
        assert_eq!(state.particles.len(), 70);
        assert!(state.drain_events().contains(&GameEvent::ConfettiBurst { count: 70 }));
        run(&mut state, &mut progress, 10.0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_spawning_follows_level_budget() {
        let (mut state, mut progress) = setup(5);
        // Keep the player out of the way and out of reach of the finish
        state.player.invincibility = 1.0e6;
        for _ in 0..(60 * 12) {
            state.player.pos.x = state.tuning.start_x();
            tick(&mut state, &mut progress, &TickInput::default(), DT);
        }
        let level = LevelConfig::for_level(5);
        assert_eq!(state.spawner.rolling.spawned, level.rolling_count);
        assert_eq!(state.spawner.flying.spawned, level.flying_count);
        assert_eq!(progress.lives(), INITIAL_LIVES);
    }

    #[test]
    fn test_autopilot_hops_rolling_hazards() {
        let (mut state, mut progress) = setup(1);
        state.spawner.flying.budget = 0;
        let input = TickInput {
            jump: false,
            idle_mode: true,
        };
        for _ in 0..(60 * 20) {
            tick(&mut state, &mut progress, &input, DT);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(state.spawner.rolling.spawned, 1);
        assert_eq!(progress.lives(), INITIAL_LIVES);
        assert_eq!(state.phase, GamePhase::Transition);
    }
}
