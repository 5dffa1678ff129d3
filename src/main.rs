//! Balance Beam entry point
//!
//! Natively this runs a headless autoplay demo of the whole game: every level is
//! played by the autopilot at a fixed 60 Hz step and the events are logged.
//! Set `RUST_LOG=debug` to see spawns and transition stages.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use balance_beam::consts::TARGET_FPS;
    use balance_beam::sim::GameEvent;
    use balance_beam::{Session, Settings, platform};

    /// Give up on a level after this many simulated seconds
    const LEVEL_TIMEOUT_SECS: f32 = 120.0;

    platform::init_logging();
    log::info!("Balance Beam (native) starting...");

    let first_run = !Settings::default_path().exists();
    let settings = Settings::load();
    if first_run {
        settings.save();
    }

    let mut session = Session::new(&settings, platform::default_store());
    // Headless: nobody is pressing jump
    session.set_autoplay(true);
    session.restart_game();

    let dt = 1.0 / TARGET_FPS;
    let mut level_time = 0.0;
    loop {
        session.frame(dt, false);
        level_time += dt;

        let mut next = None;
        for event in session.drain_events() {
            match event {
                GameEvent::ScoreChanged { score } => log::info!("Score: {score}"),
                GameEvent::LivesChanged { lives } => log::info!("Lives: {lives}"),
                GameEvent::HitFlash => log::debug!("Ouch"),
                GameEvent::ConfettiBurst { count } => log::debug!("Confetti x{count}"),
                GameEvent::LevelComplete { level, final_level } => {
                    log::info!("Level {level} complete");
                    next = Some(final_level);
                }
                GameEvent::GameOver => {
                    let progress = session.progress();
                    log::info!(
                        "Game over on level {} (score {}, best {})",
                        progress.current_level(),
                        progress.score(),
                        progress.high_score()
                    );
                    return;
                }
            }
        }

        match next {
            Some(true) => {
                log::info!(
                    "All levels cleared! Final score {}",
                    session.progress().score()
                );
                return;
            }
            Some(false) => {
                session.next_level();
                level_time = 0.0;
            }
            None => {}
        }

        if level_time > LEVEL_TIMEOUT_SECS {
            log::warn!("Level {} timed out", session.progress().current_level());
            session.stop();
            return;
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser front end drives `Session` through the library crate
    balance_beam::platform::init_logging();
}
