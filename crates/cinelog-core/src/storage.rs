//! Persistence for the watched list: one slot holding a JSON array.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::error::CoreError;
use crate::models::WatchedMovie;

/// Persistence sink for the watched list.
///
/// The in-memory list is the source of truth; the store is read once at
/// session start and written after every mutation.
pub trait WatchedStore: Send {
    /// Read the slot. An absent or corrupt slot yields an empty list.
    fn load(&self) -> Vec<WatchedMovie>;

    /// Overwrite the slot with the full list.
    fn save(&mut self, movies: &[WatchedMovie]) -> Result<(), CoreError>;
}

/// File-backed store: the slot is a single JSON document on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WatchedStore for JsonFileStore {
    fn load(&self) -> Vec<WatchedMovie> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "could not read watched slot");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(movies) => movies,
            Err(err) => {
                // Corruption is "no data", never a fatal error.
                warn!(path = %self.path.display(), %err, "watched slot is corrupt, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&mut self, movies: &[WatchedMovie]) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json =
            serde_json::to_string(movies).map_err(|e| CoreError::Storage(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-process store (for tests). Clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with raw text (tests use this to simulate corruption).
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }
}

impl WatchedStore for MemoryStore {
    fn load(&self) -> Vec<WatchedMovie> {
        let slot = self.slot.lock().expect("slot mutex poisoned");
        match slot.as_deref().map(serde_json::from_str) {
            Some(Ok(movies)) => movies,
            Some(Err(err)) => {
                warn!(%err, "watched slot is corrupt, starting empty");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn save(&mut self, movies: &[WatchedMovie]) -> Result<(), CoreError> {
        let json =
            serde_json::to_string(movies).map_err(|e| CoreError::Storage(e.to_string()))?;
        *self.slot.lock().expect("slot mutex poisoned") = Some(json);
        Ok(())
    }
}
