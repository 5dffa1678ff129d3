//! Game settings and preferences
//!
//! Persisted separately from the save data (LocalStorage on web, a JSON file on
//! native). Any load failure falls back to defaults.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window size the simulation lays itself out for
    pub window_width: f32,
    pub window_height: f32,
    /// RNG seed for bee heights and confetti (None = derive from the clock)
    pub seed: Option<u64>,
    /// Let the autopilot jump on its own
    pub autoplay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            window_height: 720.0,
            seed: None,
            autoplay: false,
        }
    }
}

impl Settings {
    /// Storage key (LocalStorage key on web, file stem on native)
    pub const STORAGE_KEY: &'static str = "balance_beam_settings";

    /// Parse settings from JSON, rejecting nonsensical window sizes
    pub fn from_json(json: &str) -> Option<Self> {
        let settings: Settings = serde_json::from_str(json).ok()?;
        if settings.window_width > 0.0 && settings.window_height > 0.0 {
            Some(settings)
        } else {
            None
        }
    }

    /// Seed to use for this run
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(crate::platform::clock_seed)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Settings file in the working directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> std::path::PathBuf {
        format!("{}.json", Self::STORAGE_KEY).into()
    }

    /// Load settings from `balance_beam_settings.json` in the working directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Some(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                None => {
                    log::warn!("Ignoring invalid settings in {}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        self.save_to(&Self::default_path());
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(e) => log::warn!("Failed to save settings to {}: {e}", path.display()),
            },
            Err(e) => log::warn!("Failed to encode settings: {e}"),
        }
    }
}
