//! Level configuration table

use serde::Serialize;

use crate::Tuning;
use crate::consts::TOTAL_LEVELS;

/// Rolling hazard speed tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeedTier {
    Slow,
    Medium,
    Fast,
}

impl SpeedTier {
    /// Scaled speed for this tier
    pub fn speed(self, tuning: &Tuning) -> f32 {
        match self {
            SpeedTier::Slow => tuning.ball_slow_speed,
            SpeedTier::Medium => tuning.ball_medium_speed,
            SpeedTier::Fast => tuning.ball_fast_speed,
        }
    }
}

/// Pacing for one level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelConfig {
    pub index: u8,
    pub hazard_speed: SpeedTier,
    /// Rolling hazards spawned per attempt
    pub rolling_count: u32,
    /// Flying hazards spawned per attempt
    pub flying_count: u32,
    /// Seconds between rolling spawns
    pub rolling_interval: f32,
    /// Seconds between flying spawns
    pub flying_interval: f32,
}

/// The five levels, in order
pub const LEVELS: [LevelConfig; TOTAL_LEVELS as usize] = [
    LevelConfig {
        index: 1,
        hazard_speed: SpeedTier::Slow,
        rolling_count: 1,
        flying_count: 1,
        rolling_interval: 4.0,
        flying_interval: 6.0,
    },
    LevelConfig {
        index: 2,
        hazard_speed: SpeedTier::Slow,
        rolling_count: 2,
        flying_count: 2,
        rolling_interval: 3.5,
        flying_interval: 5.0,
    },
    LevelConfig {
        index: 3,
        hazard_speed: SpeedTier::Medium,
        rolling_count: 2,
        flying_count: 2,
        rolling_interval: 3.0,
        flying_interval: 4.5,
    },
    LevelConfig {
        index: 4,
        hazard_speed: SpeedTier::Medium,
        rolling_count: 3,
        flying_count: 3,
        rolling_interval: 2.5,
        flying_interval: 4.0,
    },
    LevelConfig {
        index: 5,
        hazard_speed: SpeedTier::Fast,
        rolling_count: 3,
        flying_count: 4,
        rolling_interval: 2.0,
        flying_interval: 3.0,
    },
];

impl LevelConfig {
    /// Config for a 1-based level index, clamped into range
    pub fn for_level(level: u8) -> &'static LevelConfig {
        let idx = level.clamp(1, TOTAL_LEVELS) as usize - 1;
        &LEVELS[idx]
    }

    /// Config for a 1-based level index, or None when out of range
    pub fn get(level: u8) -> Option<&'static LevelConfig> {
        LEVELS.get((level as usize).checked_sub(1)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_positions() {
        for (i, level) in LEVELS.iter().enumerate() {
            assert_eq!(level.index as usize, i + 1);
        }
    }

    #[test]
    fn test_difficulty_never_eases() {
        for pair in LEVELS.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(b.rolling_count >= a.rolling_count);
            assert!(b.flying_count >= a.flying_count);
            assert!(b.rolling_interval < a.rolling_interval);
            assert!(b.flying_interval < a.flying_interval);
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(LevelConfig::for_level(0).index, 1);
        assert_eq!(LevelConfig::for_level(200).index, TOTAL_LEVELS);
        assert!(LevelConfig::get(0).is_none());
        assert!(LevelConfig::get(6).is_none());
        assert_eq!(LevelConfig::get(3).map(|l| l.index), Some(3));
    }

    #[test]
    fn test_speed_tiers() {
        let tuning = Tuning::new(1000.0, 700.0);
        assert_eq!(LevelConfig::for_level(1).hazard_speed.speed(&tuning), 140.0);
        assert_eq!(LevelConfig::for_level(3).hazard_speed.speed(&tuning), 200.0);
        assert_eq!(LevelConfig::for_level(5).hazard_speed.speed(&tuning), 280.0);
    }
}
