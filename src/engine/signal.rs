//! Inbound input events and outbound game signals.
//!
//! The engine is driven by discrete external events and answers with
//! discrete signals. Nothing here blocks: a rendering collaborator feeds
//! [`InputEvent`]s in and drains [`GameSignal`]s out after each transition,
//! presenting them however it chooses.

use serde::{Deserialize, Serialize};

use crate::core::Difficulty;

/// Input surface exposed to the rendering collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// The card at this deck position was clicked.
    CardClicked(usize),
    /// A difficulty was chosen. Resets into a fresh game at that level.
    DifficultyChosen(Difficulty),
    /// Explicit retry at the current difficulty.
    Retry,
}

/// Discrete signals emitted on state transitions.
///
/// Signals queue up inside the engine and are drained with
/// [`MatchGame::take_signals`](crate::engine::MatchGame::take_signals).
/// `Won`, `NewBest`, and `TimeExpired` each fire at most once per game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameSignal {
    /// A card was turned face up.
    ///
    /// Fire-and-forget hook for an audio collaborator; ignoring it has no
    /// effect on game state.
    CardRevealed {
        /// Deck position of the revealed card.
        position: usize,
    },
    /// Every pair was matched. Emitted exactly once, on the transition.
    Won {
        /// Seconds used: configured limit minus remaining time.
        elapsed_secs: u32,
        /// Completed two-card comparisons.
        tries: u32,
    },
    /// The win improved (or first set) the best score for this grid size.
    NewBest {
        /// The newly recorded best elapsed time.
        elapsed_secs: u32,
    },
    /// The countdown hit zero before every pair was matched.
    TimeExpired,
}
