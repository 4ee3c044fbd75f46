//! # pairs-engine
//!
//! The game-state engine of a memory-matching ("pairs") game: a grid of
//! face-down cards, the player flips two at a time, and the engine tracks
//! tries, remaining time, and a persisted best score per difficulty.
//!
//! ## Design Principles
//!
//! 1. **Event-driven**: All state transitions happen in response to
//!    discrete events (card click, timer tick, difficulty change) and run
//!    to completion. The engine owns no wall clock and no event loop.
//!
//! 2. **Injected collaborators**: Persistence is a [`ScoreStore`] passed at
//!    construction; randomness is a seedable [`DeckRng`]. Both are trivially
//!    substitutable in tests.
//!
//! 3. **Signals over callbacks**: Transitions queue [`GameSignal`]s
//!    (`Won`, `NewBest`, `TimeExpired`, `CardRevealed`) that the rendering
//!    and audio collaborators drain and present however they choose.
//!
//! 4. **Stale work is discarded**: Timer ticks and deferred un-flips carry
//!    a [`GameToken`]; a reset invalidates every token handed out before
//!    it, so a superseded game's callbacks cannot touch its successor.
//!
//! ## Example
//!
//! ```
//! use pairs_engine::{DeckRng, Difficulty, GamePhase, MatchGame, MemoryStore};
//!
//! let mut game = MatchGame::new(Difficulty::Easy, MemoryStore::new(), DeckRng::new(7));
//! assert_eq!(game.phase(), GamePhase::Playing);
//! assert_eq!(game.remaining_secs(), 60);
//!
//! // One second elapses on the host's clock.
//! let token = game.token();
//! game.tick(token);
//! assert_eq!(game.remaining_secs(), 59);
//!
//! // The player flips two cards; the host clears them after its pause.
//! game.select_card(0);
//! game.select_card(1);
//! game.complete_flip(token);
//! assert_eq!(game.tries(), 1);
//! ```
//!
//! ## Modules
//!
//! - `core`: difficulty levels, deck construction, deterministic RNG
//! - `engine`: the state machine, input events, outbound signals
//! - `score`: the persistence port, best-score table, file/memory stores

pub mod core;
pub mod engine;
pub mod score;

// Re-export commonly used types
pub use crate::core::{CardValue, Deck, DeckRng, Difficulty};

pub use crate::engine::{
    CardFace, CardView, GamePhase, GameSignal, GameToken, InputEvent, MatchGame, Snapshot,
};

pub use crate::score::{BestScores, FileStore, MemoryStore, ScoreStore, StoreError, BEST_SCORE_KEY};
