//! The game-state engine: rules, state machine, events, signals.

pub mod game;
pub mod signal;

pub use game::{CardFace, CardView, GamePhase, GameToken, MatchGame, Snapshot};
pub use signal::{GameSignal, InputEvent};
