//! Key/value persistence for eggs, high scores and settings
//!
//! Backends are fallible; [`PersistenceStore`] is not. It absorbs every
//! backend failure, logs it and hands back the default, so in-memory state
//! stays authoritative for the session.

#[cfg(target_arch = "wasm32")]
mod local;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::highscores::ScoreRecord;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageBackend;

/// Storage keys
pub mod keys {
    pub const EGGS: &str = "egg_brawl_eggs";
    pub const SCORES: &str = "egg_brawl_scores";
    pub const SETTINGS: &str = "egg_brawl_settings";
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// No storage available (private browsing, no window, ...)
    Unavailable,
    /// The backend refused the operation
    Backend(String),
    /// A stored value could not be decoded
    Corrupt { key: String, reason: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Backend(message) => write!(f, "storage backend error: {message}"),
            Self::Corrupt { key, reason } => write!(f, "corrupt value for {key}: {reason}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Raw string storage
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory backend for native builds and tests.
///
/// With `fail` set every call reports [`StorageError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
    pub fail: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that fails every read and write
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Raw stored value, bypassing failure injection
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail {
            return Err(StorageError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Infallible typed access over a [`StorageBackend`]
#[derive(Debug, Clone)]
pub struct PersistenceStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> PersistenceStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Stored integer, 0 when absent or unreadable
    pub fn get_integer(&self, key: &str) -> u64 {
        self.load_json(key).unwrap_or(0)
    }

    pub fn set_integer(&mut self, key: &str, value: u64) {
        self.save_json(key, &value);
    }

    /// Stored score list in stored order, empty when absent or unreadable
    pub fn get_score_list(&self, key: &str) -> Vec<ScoreRecord> {
        self.load_json(key).unwrap_or_default()
    }

    pub fn set_score_list(&mut self, key: &str, list: &[ScoreRecord]) {
        self.save_json(key, list);
    }

    /// Decode a JSON value. `None` on absence or any failure.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_load(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to load {}: {}", key, e);
                None
            }
        }
    }

    /// Encode and store a JSON value; failures are logged and dropped
    pub fn save_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(|e| StorageError::Backend(e.to_string()))
            .and_then(|json| self.backend.write(key, &json));
        if let Err(e) = result {
            log::warn!("Failed to save {}: {}", key, e);
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(json) = self.backend.read(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }
}
