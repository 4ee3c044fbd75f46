//! The matching-game state machine.
//!
//! ## Rules
//!
//! A game lays out a shuffled deck of paired values face down. Selecting a
//! second card completes a comparison: the try counter advances, input
//! locks, and equal values join the matched set. The host then waits its
//! presentation pause and calls [`MatchGame::complete_flip`], which clears
//! the selection and unlocks input - the same path whether the pair matched
//! or not. Matching every pair wins; the countdown reaching zero first
//! times the game out. Both outcomes are terminal until the next reset.
//!
//! ## Time and callbacks
//!
//! The engine owns no wall clock. The host feeds one [`MatchGame::tick`]
//! per elapsed second and schedules the deferred un-flip itself. Every
//! scheduled callback captures a [`GameToken`] at schedule time; a reset
//! advances the generation, so callbacks left over from a superseded game
//! arrive with a stale token and are discarded.
//!
//! ## Phases
//!
//! `Playing -> {Won | TimedOut}`, one-way. Setup work happens inside
//! `start`/`reset` and is never observable.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CardValue, Deck, DeckRng, Difficulty};
use crate::score::{BestScores, ScoreStore};

use super::signal::{GameSignal, InputEvent};

/// Observable game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Input and ticks are live.
    Playing,
    /// Every pair was matched. Terminal until reset.
    Won,
    /// The countdown expired first. Terminal until reset.
    TimedOut,
}

/// Token tying a scheduled callback to the game it was scheduled for.
///
/// Capture one with [`MatchGame::token`] when scheduling a timer tick or a
/// deferred un-flip. Tokens from before a reset are stale; the engine
/// discards calls that carry them, which is how a superseded game's timer
/// is prevented from mutating its successor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameToken(u64);

/// How a single card currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    /// Face down.
    Hidden,
    /// Face up as part of the current selection.
    Revealed,
    /// Face up permanently; its pair was matched.
    Matched,
}

/// One card as the rendering collaborator sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    /// The card's face value.
    pub value: CardValue,
    /// How the card currently shows.
    pub face: CardFace,
}

/// Full observable engine state, consumed on every state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current difficulty.
    pub difficulty: Difficulty,
    /// All cards in deck order.
    pub cards: Vec<CardView>,
    /// Remaining whole seconds.
    pub remaining_secs: u32,
    /// Completed two-card comparisons.
    pub tries: u32,
    /// Best recorded elapsed time for this grid size, if any.
    pub best_score_secs: Option<u32>,
    /// Current phase.
    pub phase: GamePhase,
}

/// The game-state engine.
///
/// Owns every state transition: deck generation, selection tracking, match
/// evaluation, countdown, win detection, and best-score persistence through
/// the injected [`ScoreStore`]. Single-threaded and event-driven; each
/// operation runs to completion before the next event is processed.
pub struct MatchGame<S: ScoreStore> {
    difficulty: Difficulty,
    deck: Deck,
    /// Face-up, not-yet-matched positions. Never grows past 2.
    selection: SmallVec<[usize; 2]>,
    matched: FxHashSet<CardValue>,
    tries: u32,
    remaining_secs: u32,
    phase: GamePhase,
    /// Set while a completed comparison awaits `complete_flip`.
    locked: bool,
    scores: BestScores,
    store: S,
    rng: DeckRng,
    generation: u64,
    signals: Vec<GameSignal>,
}

impl<S: ScoreStore> MatchGame<S> {
    /// Create a game and start it at `difficulty`.
    ///
    /// Best scores are loaded from `store`; a missing or unreadable record
    /// means no best score, never an error.
    #[must_use]
    pub fn new(difficulty: Difficulty, store: S, mut rng: DeckRng) -> Self {
        let deck = Deck::build(difficulty.grid_size(), &mut rng);
        let scores = BestScores::load(&store);

        Self {
            difficulty,
            deck,
            selection: SmallVec::new(),
            matched: FxHashSet::default(),
            tries: 0,
            remaining_secs: difficulty.time_limit_secs(),
            phase: GamePhase::Playing,
            locked: false,
            scores,
            store,
            rng,
            generation: 0,
            signals: Vec::new(),
        }
    }

    /// Start a fresh game at `difficulty`.
    ///
    /// Rebuilds the deck, clears selection, matched set, and try counter,
    /// resets the countdown, reloads the best score, and advances the
    /// generation so every callback scheduled against the previous game
    /// goes stale. Undrained signals from the previous game are dropped.
    pub fn start(&mut self, difficulty: Difficulty) {
        self.generation += 1;
        self.difficulty = difficulty;
        self.deck = Deck::build(difficulty.grid_size(), &mut self.rng);
        self.selection.clear();
        self.matched.clear();
        self.tries = 0;
        self.remaining_secs = difficulty.time_limit_secs();
        self.phase = GamePhase::Playing;
        self.locked = false;
        self.scores = BestScores::load(&self.store);
        self.signals.clear();
    }

    /// Reset to a fresh game at `difficulty`. Equivalent to [`Self::start`].
    pub fn reset(&mut self, difficulty: Difficulty) {
        self.start(difficulty);
    }

    /// Reset at the current difficulty.
    pub fn retry(&mut self) {
        self.start(self.difficulty);
    }

    /// Token identifying the current game instance.
    ///
    /// Capture at schedule time and pass back to [`Self::tick`] and
    /// [`Self::complete_flip`].
    #[must_use]
    pub fn token(&self) -> GameToken {
        GameToken(self.generation)
    }

    fn is_current(&self, token: GameToken) -> bool {
        token.0 == self.generation
    }

    /// Handle a click on the card at `position`.
    ///
    /// Silently ignored while input is locked, outside `Playing`, or when
    /// the position is already face up (selected or matched). On the second
    /// selection the comparison completes immediately: the try counter
    /// advances, input locks, and a matching pair joins the matched set.
    ///
    /// ## Panics
    ///
    /// If `position` is out of range. Out-of-range input is a caller bug,
    /// not a recoverable condition.
    pub fn select_card(&mut self, position: usize) {
        assert!(position < self.deck.len(), "Card position out of range");

        if self.phase != GamePhase::Playing || self.locked {
            return;
        }
        if self.selection.contains(&position) {
            return;
        }
        if self.matched.contains(&self.deck.value_at(position)) {
            return;
        }

        self.selection.push(position);
        self.signals.push(GameSignal::CardRevealed { position });

        if self.selection.len() == 2 {
            self.tries += 1;
            self.locked = true;

            let first = self.deck.value_at(self.selection[0]);
            let second = self.deck.value_at(self.selection[1]);
            if first == second {
                self.matched.insert(first);
                self.check_win();
            }
        }
    }

    /// Finish a two-card comparison after the host's presentation pause.
    ///
    /// Clears the selection and unlocks input. The pause length is the
    /// host's choice and is the same for matches and mismatches; matched
    /// cards stay face up because matching is tracked by value, not by
    /// selection. A stale `token` means the game was reset while the
    /// callback was pending, and the call is discarded.
    pub fn complete_flip(&mut self, token: GameToken) {
        if !self.is_current(token) {
            return;
        }
        self.selection.clear();
        self.locked = false;
    }

    /// Apply one second of countdown.
    ///
    /// Driven by the host's periodic timer. Decrements only while `Playing`
    /// with time remaining; reaching zero without a win transitions to
    /// `TimedOut` and emits [`GameSignal::TimeExpired`] once. Stale tokens
    /// are discarded.
    pub fn tick(&mut self, token: GameToken) {
        if !self.is_current(token) {
            return;
        }
        if self.phase != GamePhase::Playing || self.remaining_secs == 0 {
            return;
        }

        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.phase = GamePhase::TimedOut;
            self.signals.push(GameSignal::TimeExpired);
        }
    }

    /// Check whether every pair has been matched.
    ///
    /// Runs automatically after each match. On the first transition to
    /// `Won` it freezes the countdown, emits [`GameSignal::Won`], and if
    /// the elapsed time improves the recorded best for this grid size,
    /// persists it and emits [`GameSignal::NewBest`]. Idempotent: once the
    /// game is won, further calls change nothing and emit nothing.
    pub fn check_win(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.matched.len() < self.deck.pair_count() {
            return;
        }

        self.phase = GamePhase::Won;
        let elapsed_secs = self.difficulty.time_limit_secs() - self.remaining_secs;
        self.signals.push(GameSignal::Won {
            elapsed_secs,
            tries: self.tries,
        });

        if self.scores.record(self.difficulty.grid_size(), elapsed_secs) {
            self.scores.save(&mut self.store);
            self.signals.push(GameSignal::NewBest { elapsed_secs });
        }
    }

    /// Dispatch an event from the rendering collaborator.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::CardClicked(position) => self.select_card(position),
            InputEvent::DifficultyChosen(difficulty) => self.start(difficulty),
            InputEvent::Retry => self.retry(),
        }
    }

    /// Drain the signals queued since the last drain.
    pub fn take_signals(&mut self) -> Vec<GameSignal> {
        std::mem::take(&mut self.signals)
    }

    /// Full observable state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let cards = self
            .deck
            .values()
            .iter()
            .enumerate()
            .map(|(position, &value)| {
                let face = if self.matched.contains(&value) {
                    CardFace::Matched
                } else if self.selection.contains(&position) {
                    CardFace::Revealed
                } else {
                    CardFace::Hidden
                };
                CardView { value, face }
            })
            .collect();

        Snapshot {
            difficulty: self.difficulty,
            cards,
            remaining_secs: self.remaining_secs,
            tries: self.tries,
            best_score_secs: self.best_score(),
            phase: self.phase,
        }
    }

    // === Accessors ===

    /// Current difficulty.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The deck in play.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Currently selected positions, oldest first.
    #[must_use]
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Number of pairs matched so far.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched.len()
    }

    /// Whether `value` has been matched.
    #[must_use]
    pub fn is_matched(&self, value: CardValue) -> bool {
        self.matched.contains(&value)
    }

    /// Completed two-card comparisons.
    #[must_use]
    pub fn tries(&self) -> u32 {
        self.tries
    }

    /// Remaining whole seconds.
    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Whether input is locked awaiting [`Self::complete_flip`].
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Best recorded elapsed time for the current grid size, if any.
    #[must_use]
    pub fn best_score(&self) -> Option<u32> {
        self.scores.get(self.difficulty.grid_size())
    }

    /// The injected score store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::MemoryStore;

    fn new_game(seed: u64) -> MatchGame<MemoryStore> {
        MatchGame::new(Difficulty::Easy, MemoryStore::new(), DeckRng::new(seed))
    }

    /// Positions of some pair sharing a value.
    fn matching_pair(game: &MatchGame<MemoryStore>) -> (usize, usize) {
        let deck = game.deck();
        for i in 0..deck.len() {
            for j in (i + 1)..deck.len() {
                if deck.value_at(i) == deck.value_at(j) {
                    return (i, j);
                }
            }
        }
        unreachable!("every deck holds pairs");
    }

    #[test]
    fn test_fresh_game_state() {
        let game = new_game(42);

        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.tries(), 0);
        assert_eq!(game.remaining_secs(), 60);
        assert_eq!(game.deck().len(), 8);
        assert!(game.selection().is_empty());
        assert!(!game.is_locked());
        assert_eq!(game.best_score(), None);
    }

    #[test]
    fn test_first_selection_reveals() {
        let mut game = new_game(42);

        game.select_card(0);

        assert_eq!(game.selection(), &[0]);
        assert!(!game.is_locked());
        assert_eq!(game.tries(), 0);
        assert_eq!(
            game.take_signals(),
            vec![GameSignal::CardRevealed { position: 0 }]
        );
    }

    #[test]
    fn test_second_selection_locks_and_counts() {
        let mut game = new_game(42);
        let (a, b) = matching_pair(&game);

        game.select_card(a);
        game.select_card(b);

        assert_eq!(game.tries(), 1);
        assert!(game.is_locked());
        assert_eq!(game.matched_pairs(), 1);
    }

    #[test]
    fn test_reselecting_same_position_is_ignored() {
        let mut game = new_game(42);

        game.select_card(3);
        game.select_card(3);

        assert_eq!(game.selection(), &[3]);
        assert_eq!(game.tries(), 0);
    }

    #[test]
    fn test_complete_flip_unlocks() {
        let mut game = new_game(42);
        let token = game.token();
        let (a, b) = matching_pair(&game);

        game.select_card(a);
        game.select_card(b);
        game.complete_flip(token);

        assert!(game.selection().is_empty());
        assert!(!game.is_locked());
        // The matched pair stays matched after the un-flip.
        assert_eq!(game.matched_pairs(), 1);
    }

    #[test]
    fn test_matched_positions_reject_reselection() {
        let mut game = new_game(42);
        let token = game.token();
        let (a, b) = matching_pair(&game);

        game.select_card(a);
        game.select_card(b);
        game.complete_flip(token);

        game.select_card(a);
        assert!(game.selection().is_empty());
    }

    #[test]
    fn test_tick_counts_down() {
        let mut game = new_game(42);
        let token = game.token();

        game.tick(token);
        game.tick(token);

        assert_eq!(game.remaining_secs(), 58);
    }

    #[test]
    fn test_stale_token_discarded() {
        let mut game = new_game(42);
        let stale = game.token();

        game.retry();

        game.tick(stale);
        assert_eq!(game.remaining_secs(), 60);

        game.select_card(0);
        game.complete_flip(stale);
        assert_eq!(game.selection(), &[0]);
    }

    #[test]
    fn test_start_clears_pending_signals() {
        let mut game = new_game(42);

        game.select_card(0);
        game.start(Difficulty::Medium);

        assert!(game.take_signals().is_empty());
        assert_eq!(game.deck().len(), 16);
        assert_eq!(game.remaining_secs(), 90);
    }

    #[test]
    #[should_panic(expected = "Card position out of range")]
    fn test_out_of_range_position_panics() {
        let mut game = new_game(42);
        game.select_card(8);
    }

    #[test]
    fn test_snapshot_faces() {
        let mut game = new_game(42);
        let (a, b) = matching_pair(&game);

        game.select_card(a);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.cards[a].face, CardFace::Revealed);

        game.select_card(b);
        game.complete_flip(game.token());
        let snapshot = game.snapshot();
        assert_eq!(snapshot.cards[a].face, CardFace::Matched);
        assert_eq!(snapshot.cards[b].face, CardFace::Matched);
        assert!(snapshot
            .cards
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != a && i != b)
            .all(|(_, card)| card.face == CardFace::Hidden));
    }

    #[test]
    fn test_handle_dispatches() {
        let mut game = new_game(42);

        game.handle(InputEvent::CardClicked(1));
        assert_eq!(game.selection(), &[1]);

        game.handle(InputEvent::DifficultyChosen(Difficulty::Hard));
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(game.deck().len(), 32);

        game.handle(InputEvent::Retry);
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(game.tries(), 0);
    }
}
