//! Difficulty levels and their grid-size / time-limit mapping.
//!
//! Each level is a total mapping to a grid size (how many cards are laid
//! out) and a countdown limit in whole seconds:
//!
//! | Level  | Cards | Limit |
//! |--------|-------|-------|
//! | Easy   | 8     | 60s   |
//! | Medium | 16    | 90s   |
//! | Hard   | 32    | 120s  |
//! | Expert | 64    | 180s  |

use serde::{Deserialize, Serialize};

/// Difficulty level selecting grid size and time limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All levels, easiest first.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Total number of cards in play. Always even.
    #[must_use]
    pub const fn grid_size(self) -> usize {
        match self {
            Difficulty::Easy => 8,
            Difficulty::Medium => 16,
            Difficulty::Hard => 32,
            Difficulty::Expert => 64,
        }
    }

    /// Countdown limit in whole seconds.
    #[must_use]
    pub const fn time_limit_secs(self) -> u32 {
        match self {
            Difficulty::Easy => 60,
            Difficulty::Medium => 90,
            Difficulty::Hard => 120,
            Difficulty::Expert => 180,
        }
    }

    /// Number of distinct pairs in the deck.
    #[must_use]
    pub const fn pair_count(self) -> usize {
        self.grid_size() / 2
    }

    /// The level whose grid has exactly `grid_size` cards, if any.
    #[must_use]
    pub fn from_grid_size(grid_size: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.grid_size() == grid_size)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
