//! Deck construction: paired values, uniformly shuffled.
//!
//! A deck of `grid_size` cards holds every value in `1..=grid_size/2`
//! exactly twice, in a uniformly random order. The grid size must be even
//! and at least 4; violating that is a caller bug, not a runtime error.

use serde::{Deserialize, Serialize};

use super::rng::DeckRng;

/// A card's face value. Two cards in every deck share each value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardValue(pub u16);

impl CardValue {
    /// Create a new card value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered, shuffled sequence of paired card values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardValue>,
}

impl Deck {
    /// Build a shuffled deck of `grid_size` cards.
    ///
    /// Each value in `1..=grid_size/2` appears exactly twice.
    ///
    /// ## Panics
    ///
    /// If `grid_size` is odd or below 4.
    #[must_use]
    pub fn build(grid_size: usize, rng: &mut DeckRng) -> Self {
        assert!(grid_size >= 4, "Grid size must be at least 4");
        assert!(grid_size % 2 == 0, "Grid size must be even");

        let mut cards: Vec<CardValue> = (1..=(grid_size / 2) as u16)
            .flat_map(|v| [CardValue::new(v), CardValue::new(v)])
            .collect();
        rng.shuffle(&mut cards);

        Self { cards }
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck is empty. Never true for a built deck.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of distinct pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// The value of the card at `position`.
    ///
    /// ## Panics
    ///
    /// If `position` is out of range.
    #[must_use]
    pub fn value_at(&self, position: usize) -> CardValue {
        self.cards[position]
    }

    /// All card values in deck order.
    #[must_use]
    pub fn values(&self) -> &[CardValue] {
        &self.cards
    }
}
