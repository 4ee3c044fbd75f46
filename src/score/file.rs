//! File-backed score store.
//!
//! One JSON file mapping store keys to payload strings. A missing file
//! reads as empty and the parent directory is created on first write, so a
//! fresh install needs no setup step.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::store::{ScoreStore, StoreError};

/// Score store backed by a single JSON file on disk.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file is not touched until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<FxHashMap<String, String>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(FxHashMap::default());
            }
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_str(&raw)?)
    }
}

impl ScoreStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries().unwrap_or_else(|err| {
            tracing::warn!("score file unreadable, rewriting: {err}");
            FxHashMap::default()
        });
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string(&entries)?)?;
        Ok(())
    }
}
