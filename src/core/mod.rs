//! Core types: difficulty levels, deck construction, deterministic RNG.
//!
//! These are the building blocks the engine is assembled from; none of them
//! carry game rules on their own.

pub mod deck;
pub mod difficulty;
pub mod rng;

pub use deck::{CardValue, Deck};
pub use difficulty::Difficulty;
pub use rng::DeckRng;
