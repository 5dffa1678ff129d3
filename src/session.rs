//! Game session: progress plus the live attempt
//!
//! The session owns the [`ProgressTracker`] and at most one [`GameState`]. Menu
//! actions (next level, retry, restart, level select) map onto methods here, and
//! the frame scheduler calls [`Session::frame`] once per display frame.

use crate::consts::MAX_FRAME_DT;
use crate::persistence::SaveStore;
use crate::sim::{FrameSnapshot, GameEvent, GamePhase, GameState, TickInput, snapshot, tick};
use crate::{LevelSelectError, ProgressTracker, Settings, Tuning};

#[derive(Debug)]
pub struct Session {
    tuning: Tuning,
    seed: u64,
    /// Attempts started so far; mixed into each attempt's seed
    attempts: u64,
    autoplay: bool,
    progress: ProgressTracker,
    attempt: Option<GameState>,
}

impl Session {
    pub fn new(settings: &Settings, store: Box<dyn SaveStore>) -> Self {
        let seed = settings.effective_seed();
        log::info!("Session seed: {seed}");
        Self {
            tuning: Tuning::from_settings(settings),
            seed,
            attempts: 0,
            autoplay: settings.autoplay,
            progress: ProgressTracker::load(store),
            attempt: None,
        }
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn attempt(&self) -> Option<&GameState> {
        self.attempt.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.attempt.is_some()
    }

    pub fn phase(&self) -> Option<GamePhase> {
        self.attempt.as_ref().map(|s| s.phase)
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn set_autoplay(&mut self, on: bool) {
        self.autoplay = on;
        log::info!("Autoplay: {on}");
    }

    /// Begin a fresh attempt at the current level, replacing any running one
    pub fn start_attempt(&mut self) {
        let seed = self.seed.wrapping_add(self.attempts);
        self.attempts += 1;

        let level = self.progress.level_config();
        let mut state = GameState::new(self.tuning.clone(), level, seed);
        state.emit(GameEvent::ScoreChanged {
            score: self.progress.score(),
        });
        state.emit(GameEvent::LivesChanged {
            lives: self.progress.lives(),
        });
        log::info!(
            "Starting level {} with {} lives",
            level.index,
            self.progress.lives()
        );
        self.attempt = Some(state);
    }

    /// Drop the running attempt; no further frames touch it
    pub fn stop(&mut self) {
        if self.attempt.take().is_some() {
            log::debug!("Attempt stopped");
        }
    }

    /// Advance to the next level and start it. Returns false on the last level.
    pub fn next_level(&mut self) -> bool {
        if !self.progress.advance_level() {
            return false;
        }
        self.start_attempt();
        true
    }

    /// Replay the current level with full lives
    pub fn retry_level(&mut self) {
        self.progress.reset_lives();
        self.start_attempt();
    }

    /// New game from level 1; unlocks and best score are kept
    pub fn restart_game(&mut self) {
        self.progress.start_new_game();
        self.start_attempt();
    }

    /// Start an unlocked level with full lives
    pub fn select_level(&mut self, level: u8) -> Result<(), LevelSelectError> {
        self.progress.select_level(level)?;
        self.start_attempt();
        Ok(())
    }

    /// Run one display frame of `dt` seconds
    pub fn frame(&mut self, dt: f32, jump: bool) {
        let Some(state) = self.attempt.as_mut() else {
            return;
        };
        let input = TickInput {
            jump,
            idle_mode: self.autoplay,
        };
        tick(state, &mut self.progress, &input, dt.clamp(0.0, MAX_FRAME_DT));
    }

    /// Take pending events from the running attempt
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.attempt
            .as_mut()
            .map(GameState::drain_events)
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> Option<FrameSnapshot> {
        self.attempt
            .as_ref()
            .map(|state| snapshot(state, self.progress.state()))
    }
}
