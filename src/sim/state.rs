//! Game state and core simulation types
//!
//! One `GameState` covers a single attempt at a level: the player, live hazards,
//! spawn pacing, the level transition and any celebration particles.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::hazard::{FlyingHazard, RollingHazard};
use super::level::LevelConfig;
use super::particles::Particle;
use super::player::Player;
use super::spawn::Spawner;
use super::transition::Choreographer;
use crate::Tuning;

/// Current phase of the attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Walking the beam
    Playing,
    /// Finish reached, level transition routine running
    Transition,
    /// Routine done, waiting for the player to pick what's next
    LevelComplete,
    /// Out of lives
    GameOver,
}

/// Discrete events for presentation collaborators (HUD, audio, effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    LivesChanged { lives: u8 },
    /// Player was hit; flash the sprite
    HitFlash,
    /// Transition finished. Ring the bell for `level`.
    LevelComplete { level: u8, final_level: bool },
    /// Celebration particles were spawned
    ConfettiBurst { count: usize },
    GameOver,
}

/// State of one attempt
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub level: LevelConfig,
    pub phase: GamePhase,
    pub player: Player,
    /// Rolling hazards (sorted by id)
    pub balls: Vec<RollingHazard>,
    /// Flying hazards (sorted by id)
    pub bees: Vec<FlyingHazard>,
    /// Celebration particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub spawner: Spawner,
    /// Present only while the level transition runs
    pub transition: Option<Choreographer>,
    /// Seconds spent in the Playing phase
    pub elapsed: f32,
    /// Pending presentation events
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Fresh attempt at `level`
    pub fn new(tuning: Tuning, level: &LevelConfig, seed: u64) -> Self {
        let player = Player::new(&tuning, Vec2::new(tuning.start_x(), tuning.beam_top));
        Self {
            spawner: Spawner::for_level(level),
            level: level.clone(),
            phase: GamePhase::Playing,
            player,
            balls: Vec::new(),
            bees: Vec::new(),
            particles: Vec::new(),
            transition: None,
            elapsed: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Roll a ball in from the right edge along the beam
    pub fn spawn_ball(&mut self) {
        let id = self.next_entity_id();
        let pos = Vec2::new(self.tuning.spawn_x(), self.tuning.beam_top);
        let speed = self.level.hazard_speed.speed(&self.tuning);
        log::debug!("Spawn ball #{id} at speed {speed}");
        self.balls
            .push(RollingHazard::new(id, pos, self.tuning.ball_radius, speed));
    }

    /// Fly a bee in from the right edge at a random height above the beam
    pub fn spawn_bee(&mut self) {
        let id = self.next_entity_id();
        let (min_y, max_y) = self.tuning.bee_band();
        let y = if max_y > min_y {
            self.rng.random_range(min_y..max_y)
        } else {
            min_y
        };
        let size = Vec2::new(self.tuning.bee_width + 20.0, self.tuning.bee_height + 25.0);
        log::debug!("Spawn bee #{id} at y={y:.1}");
        self.bees.push(FlyingHazard::new(
            id,
            Vec2::new(self.tuning.spawn_x(), y),
            size,
            self.tuning.bee_speed,
        ));
    }

    /// Restart the attempt after a lost life: player back to the start, hazards
    /// cleared, spawn timers re-armed. Invincibility carries over.
    pub fn reset_attempt(&mut self) {
        let start = Vec2::new(self.tuning.start_x(), self.tuning.beam_top);
        self.player.reset_to(start);
        self.balls.clear();
        self.bees.clear();
        self.spawner.reset();
    }

    /// Level this attempt is playing
    pub fn level_index(&self) -> u8 {
        self.level.index
    }
}
