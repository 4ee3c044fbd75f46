//! Best-score persistence: the key-value port and its implementations.
//!
//! The engine reads the best score on every start and writes only when a
//! win improves it. Storage problems never reach the player: unreadable
//! data degrades to "no best score yet".

pub mod best;
pub mod file;
pub mod store;

pub use best::{BestScores, BEST_SCORE_KEY};
pub use file::FileStore;
pub use store::{MemoryStore, ScoreStore, StoreError};
