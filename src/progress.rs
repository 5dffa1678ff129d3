//! Level and progress tracking
//!
//! Lives, score and the current level are session-only. The best score and the
//! highest unlocked level are persisted through a [`SaveStore`] whenever either
//! one increases.

use std::fmt;

use serde::Serialize;

use crate::consts::{INITIAL_LIVES, POINTS_PER_LEVEL, TOTAL_LEVELS};
use crate::persistence::{SaveData, SaveStore};
use crate::sim::LevelConfig;

/// Snapshot of player progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressState {
    pub lives: u8,
    pub score: u64,
    pub current_level: u8,
    pub high_score: u64,
    pub highest_unlocked_level: u8,
}

impl ProgressState {
    fn fresh(saved: SaveData) -> Self {
        Self {
            lives: INITIAL_LIVES,
            score: 0,
            current_level: 1,
            high_score: saved.high_score,
            highest_unlocked_level: saved.unlocked_level,
        }
    }

    fn save_data(&self) -> SaveData {
        SaveData {
            high_score: self.high_score,
            unlocked_level: self.highest_unlocked_level,
        }
    }
}

/// Result of finishing a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCompletion {
    /// Level that was just finished
    pub level: u8,
    /// Whether it was the last level
    pub final_level: bool,
    /// Level unlocked by this completion, if any
    pub unlocked: Option<u8>,
}

/// Why a level selection was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSelectError {
    OutOfRange { requested: u8 },
    Locked { requested: u8, unlocked: u8 },
}

impl fmt::Display for LevelSelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { requested } => {
                write!(f, "level {requested} is outside 1..={TOTAL_LEVELS}")
            }
            Self::Locked {
                requested,
                unlocked,
            } => write!(
                f,
                "level {requested} is locked (highest unlocked: {unlocked})"
            ),
        }
    }
}

impl std::error::Error for LevelSelectError {}

/// Owns the progress state and its persistence
pub struct ProgressTracker {
    state: ProgressState,
    store: Box<dyn SaveStore>,
}

impl fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ProgressTracker {
    /// Load persisted progress; missing or corrupt saves start fresh
    pub fn load(store: Box<dyn SaveStore>) -> Self {
        let saved = match store.load() {
            Ok(Some(data)) => {
                log::info!(
                    "Loaded save: high score {}, unlocked level {}",
                    data.high_score,
                    data.unlocked_level
                );
                data
            }
            Ok(None) => {
                log::info!("No save found, starting fresh");
                SaveData::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable save ({e}), starting fresh");
                SaveData::default()
            }
        };

        Self {
            state: ProgressState::fresh(saved),
            store,
        }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn current_level(&self) -> u8 {
        self.state.current_level
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn highest_unlocked_level(&self) -> u8 {
        self.state.highest_unlocked_level
    }

    /// Configuration of the level being played
    pub fn level_config(&self) -> &'static LevelConfig {
        LevelConfig::for_level(self.state.current_level)
    }

    /// Persist the best score and unlock; failures are logged, never fatal
    pub fn save(&mut self) {
        if let Err(e) = self.store.save(&self.state.save_data()) {
            log::warn!("Failed to save progress: {e}");
        }
    }

    pub fn reset_lives(&mut self) {
        self.state.lives = INITIAL_LIVES;
    }

    /// Take a life; returns whether any remain
    pub fn lose_life(&mut self) -> bool {
        self.state.lives = self.state.lives.saturating_sub(1);
        self.state.lives > 0
    }

    pub fn add_points(&mut self, points: u64) {
        self.state.score += points;
        if self.state.score > self.state.high_score {
            self.state.high_score = self.state.score;
            self.save();
        }
    }

    /// Award the level bonus and unlock the next level if this was the frontier
    pub fn complete_level(&mut self) -> LevelCompletion {
        self.add_points(POINTS_PER_LEVEL);

        let level = self.state.current_level;
        let mut unlocked = None;
        if level >= self.state.highest_unlocked_level && level < TOTAL_LEVELS {
            self.state.highest_unlocked_level = level + 1;
            unlocked = Some(level + 1);
            self.save();
        }

        LevelCompletion {
            level,
            final_level: level == TOTAL_LEVELS,
            unlocked,
        }
    }

    /// Move to the next level; returns false on the last one
    pub fn advance_level(&mut self) -> bool {
        if self.state.current_level < TOTAL_LEVELS {
            self.state.current_level += 1;
            true
        } else {
            false
        }
    }

    pub fn start_new_game(&mut self) {
        self.reset_lives();
        self.state.score = 0;
        self.state.current_level = 1;
    }

    /// Jump to an unlocked level with full lives
    pub fn select_level(&mut self, level: u8) -> Result<u8, LevelSelectError> {
        let config =
            LevelConfig::get(level).ok_or(LevelSelectError::OutOfRange { requested: level })?;
        if config.index > self.state.highest_unlocked_level {
            return Err(LevelSelectError::Locked {
                requested: level,
                unlocked: self.state.highest_unlocked_level,
            });
        }
        self.state.current_level = config.index;
        self.reset_lives();
        Ok(config.index)
    }
}
