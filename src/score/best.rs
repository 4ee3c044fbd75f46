//! The per-difficulty best-score table and its wire format.
//!
//! Stored under a single fixed key as a JSON object mapping grid size to
//! the lowest elapsed seconds recorded on a win, e.g. `{"8":45,"16":72}`.
//! Loading is lenient: a missing, unreadable, or malformed payload yields
//! an empty table and a warning, never an error the player sees.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::store::{ScoreStore, StoreError};

/// Fixed store key for the best-score table.
pub const BEST_SCORE_KEY: &str = "bestScore";

/// Best elapsed time per grid size, in seconds. Lower is better.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestScores {
    by_grid_size: FxHashMap<usize, u32>,
}

impl BestScores {
    /// Load the table from `store`.
    ///
    /// Missing, unreadable, and malformed payloads all yield an empty
    /// table; read problems are logged, not surfaced.
    #[must_use]
    pub fn load<S: ScoreStore>(store: &S) -> Self {
        let raw = match store.get(BEST_SCORE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(err) => {
                tracing::warn!("best-score read failed, starting empty: {err}");
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(scores) => scores,
            Err(err) => {
                tracing::warn!("best-score payload malformed, starting empty: {err}");
                Self::default()
            }
        }
    }

    /// Best elapsed seconds recorded for `grid_size`, if any.
    #[must_use]
    pub fn get(&self, grid_size: usize) -> Option<u32> {
        self.by_grid_size.get(&grid_size).copied()
    }

    /// Record `elapsed_secs` for `grid_size` if it beats the stored best.
    ///
    /// Returns whether the score was recorded. A first score always counts;
    /// a tie does not improve and is not recorded.
    pub fn record(&mut self, grid_size: usize, elapsed_secs: u32) -> bool {
        match self.by_grid_size.get(&grid_size) {
            Some(&best) if best <= elapsed_secs => false,
            _ => {
                self.by_grid_size.insert(grid_size, elapsed_secs);
                true
            }
        }
    }

    /// Persist the table through `store`.
    ///
    /// Write failures are logged and swallowed; the in-memory table stays
    /// authoritative for the session.
    pub fn save<S: ScoreStore>(&self, store: &mut S) {
        let encoded = match serde_json::to_string(self) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!("best-score table could not be encoded: {err}");
                return;
            }
        };

        if let Err(err) = store.set(BEST_SCORE_KEY, &encoded) {
            tracing::warn!("best-score write failed: {err}");
        }
    }

    /// Whether any score has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_grid_size.is_empty()
    }

    /// Number of grid sizes with a recorded score.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_grid_size.len()
    }
}
