//! The key-value persistence port.
//!
//! The engine never talks to storage directly; it is handed a [`ScoreStore`]
//! at construction, so tests substitute an in-memory map and real sessions
//! use a file. Absence of a key is "nothing recorded", not an error, and
//! consumers degrade on every error a store can produce.

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors a score store can produce.
///
/// Consumers degrade on every variant: a failed read means "no best score
/// yet", and a failed write leaves the in-memory score authoritative for
/// the session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("score payload could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable key-value store holding serialized score payloads.
pub trait ScoreStore {
    /// Read the payload stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous payload.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and embedding without durability.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at the raw payload under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
