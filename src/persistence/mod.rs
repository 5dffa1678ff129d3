//! Save data persistence
//!
//! Features:
//! - One JSON document per save: `{"game_data": {...}}`
//! - Pluggable backends: JSON file (native), LocalStorage (web), memory (tests)
//! - Corruption detection: callers get an error and fall back to defaults

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::TOTAL_LEVELS;

/// Persisted progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default)]
    pub high_score: u64,
    #[serde(default = "first_level")]
    pub unlocked_level: u8,
}

fn first_level() -> u8 {
    1
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            high_score: 0,
            unlocked_level: 1,
        }
    }
}

impl SaveData {
    /// Clamp fields into their valid ranges
    pub fn sanitized(self) -> Self {
        Self {
            high_score: self.high_score,
            unlocked_level: self.unlocked_level.clamp(1, TOTAL_LEVELS),
        }
    }
}

/// On-disk envelope
#[derive(Debug, Serialize, Deserialize)]
struct SaveDocument {
    game_data: SaveData,
}

/// Encode save data as a JSON document
pub fn encode(data: &SaveData) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&SaveDocument { game_data: *data })?)
}

/// Decode a JSON save document
pub fn decode(json: &str) -> Result<SaveData, SaveError> {
    let doc: SaveDocument = serde_json::from_str(json)?;
    Ok(doc.game_data.sanitized())
}

/// Errors from reading or writing save data
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Corrupt(serde_json::Error),
    Unavailable(&'static str),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "save I/O failed: {e}"),
            Self::Corrupt(e) => write!(f, "save data is corrupt: {e}"),
            Self::Unavailable(what) => write!(f, "save storage unavailable: {what}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Corrupt(e) => Some(e),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        Self::Corrupt(e)
    }
}

/// A key-value backend holding one save document
pub trait SaveStore {
    /// Read the stored document (`Ok(None)` when nothing has been saved yet)
    fn read(&self) -> Result<Option<String>, SaveError>;
    /// Replace the stored document
    fn write(&mut self, json: &str) -> Result<(), SaveError>;

    /// Load and decode save data
    fn load(&self) -> Result<Option<SaveData>, SaveError> {
        self.read()?.map(|json| decode(&json)).transpose()
    }

    /// Encode and store save data
    fn save(&mut self, data: &SaveData) -> Result<(), SaveError> {
        let json = encode(data)?;
        self.write(&json)
    }
}

/// In-memory store; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw document
    pub fn with_contents(json: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(json.to_string()))),
        }
    }

    /// Raw document currently held
    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&mut self, json: &str) -> Result<(), SaveError> {
        *self.slot.borrow_mut() = Some(json.to_string());
        Ok(())
    }
}

/// JSON file store (native)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    /// Default save file name
    pub const FILE_NAME: &'static str = "balance_beam_save.json";

    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SaveStore for JsonFileStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, json: &str) -> Result<(), SaveError> {
        // Temp file + rename keeps the save atomic
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "balance_beam_save";

    fn storage() -> Result<web_sys::Storage, SaveError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(SaveError::Unavailable("LocalStorage"))
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Self::storage()?
            .get_item(Self::STORAGE_KEY)
            .map_err(|_| SaveError::Unavailable("LocalStorage read"))
    }

    fn write(&mut self, json: &str) -> Result<(), SaveError> {
        Self::storage()?
            .set_item(Self::STORAGE_KEY, json)
            .map_err(|_| SaveError::Unavailable("LocalStorage write"))
    }
}
