//! Hazard spawn pacing
//!
//! Each hazard class has its own timer and budget. Timers start half-full so the
//! first hazard arrives after half an interval.

use serde::Serialize;

use super::level::LevelConfig;

/// Timer and budget for one hazard class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpawnTrack {
    pub timer: f32,
    pub interval: f32,
    pub budget: u32,
    pub spawned: u32,
}

impl SpawnTrack {
    pub fn new(interval: f32, budget: u32) -> Self {
        Self {
            timer: interval / 2.0,
            interval,
            budget,
            spawned: 0,
        }
    }

    /// Re-arm for a fresh attempt
    pub fn reset(&mut self) {
        self.timer = self.interval / 2.0;
        self.spawned = 0;
    }

    /// Accumulate time; returns true when a hazard should spawn now
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.exhausted() {
            return false;
        }
        self.timer += dt;
        if self.timer >= self.interval {
            self.timer = 0.0;
            self.spawned += 1;
            true
        } else {
            false
        }
    }

    pub fn exhausted(&self) -> bool {
        self.spawned >= self.budget
    }
}

/// Spawn pacing for both hazard classes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spawner {
    pub rolling: SpawnTrack,
    pub flying: SpawnTrack,
}

impl Spawner {
    pub fn for_level(config: &LevelConfig) -> Self {
        Self {
            rolling: SpawnTrack::new(config.rolling_interval, config.rolling_count),
            flying: SpawnTrack::new(config.flying_interval, config.flying_count),
        }
    }

    pub fn reset(&mut self) {
        self.rolling.reset();
        self.flying.reset();
    }

    /// Advance both timers; returns (spawn rolling, spawn flying)
    pub fn tick(&mut self, dt: f32) -> (bool, bool) {
        (self.rolling.tick(dt), self.flying.tick(dt))
    }
}
