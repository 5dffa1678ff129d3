//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging setup
//! - Storage (LocalStorage on web, JSON file on native)
//! - Clock-derived seeds

use crate::persistence::SaveStore;

/// Install the logger for this platform
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
}

/// Install the logger for this platform
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Save backend for this platform
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn SaveStore> {
    Box::new(crate::persistence::LocalStorageStore)
}

/// Save backend for this platform
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Box<dyn SaveStore> {
    Box::new(crate::persistence::JsonFileStore::new(
        crate::persistence::JsonFileStore::FILE_NAME,
    ))
}

/// Seed derived from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

/// Seed from the OS entropy source (no wall clock in wasm32-unknown-unknown)
#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    rand::random()
}
