//! Persistence tests: the store port, degradation on failure, and the
//! restart-surviving file store.

use pairs_engine::{
    BestScores, DeckRng, Difficulty, FileStore, GamePhase, GameSignal, MatchGame, MemoryStore,
    ScoreStore, StoreError, BEST_SCORE_KEY,
};

/// Store whose reads and writes always fail, for degradation tests.
struct BrokenStore;

impl ScoreStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "broken").into())
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "broken").into())
    }
}

fn play_to_win<S: ScoreStore>(game: &mut MatchGame<S>) {
    let token = game.token();
    while game.phase() == GamePhase::Playing {
        let deck = game.deck();
        let mut pair = None;
        'outer: for i in 0..deck.len() {
            let value = deck.value_at(i);
            if game.is_matched(value) {
                continue;
            }
            for j in (i + 1)..deck.len() {
                if deck.value_at(j) == value {
                    pair = Some((i, j));
                    break 'outer;
                }
            }
        }
        let (a, b) = pair.expect("live game has an unmatched pair");
        game.select_card(a);
        game.select_card(b);
        game.complete_flip(token);
    }
}

#[test]
fn best_score_round_trips_between_engines() {
    let mut game = MatchGame::new(Difficulty::Easy, MemoryStore::new(), DeckRng::new(42));
    let token = game.token();

    for _ in 0..25 {
        game.tick(token);
    }
    play_to_win(&mut game);
    assert_eq!(game.best_score(), Some(25));

    // A second engine over the same store sees the recorded best.
    let store = game.store().clone();
    let second = MatchGame::new(Difficulty::Easy, store, DeckRng::new(1));
    assert_eq!(second.best_score(), Some(25));
}

#[test]
fn recorded_payload_matches_wire_format() {
    let mut game = MatchGame::new(Difficulty::Easy, MemoryStore::new(), DeckRng::new(42));
    let token = game.token();

    for _ in 0..45 {
        game.tick(token);
    }
    play_to_win(&mut game);

    assert_eq!(game.store().raw(BEST_SCORE_KEY), Some(r#"{"8":45}"#));
}

#[test]
fn worse_score_never_overwrites() {
    let mut store = MemoryStore::new();
    let mut scores = BestScores::default();
    scores.record(8, 40);
    scores.save(&mut store);

    let mut game = MatchGame::new(Difficulty::Easy, store, DeckRng::new(42));
    let token = game.token();
    for _ in 0..55 {
        game.tick(token);
    }
    play_to_win(&mut game);

    let reloaded = BestScores::load(game.store());
    assert_eq!(reloaded.get(8), Some(40));
}

#[test]
fn broken_store_degrades_to_no_best_score() {
    let mut game = MatchGame::new(Difficulty::Easy, BrokenStore, DeckRng::new(42));

    // The failed read means "no best score yet", not an error.
    assert_eq!(game.best_score(), None);

    // Winning still signals normally; the failed write is swallowed and
    // the session keeps its in-memory best.
    play_to_win(&mut game);
    let signals = game.take_signals();
    assert!(signals.iter().any(|s| matches!(s, GameSignal::Won { .. })));
    assert!(signals
        .iter()
        .any(|s| matches!(s, GameSignal::NewBest { .. })));
    assert!(game.best_score().is_some());
}

#[test]
fn file_store_survives_process_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pairs").join("scores.json");

    let mut game = MatchGame::new(
        Difficulty::Easy,
        FileStore::new(&path),
        DeckRng::new(42),
    );
    let token = game.token();
    for _ in 0..33 {
        game.tick(token);
    }
    play_to_win(&mut game);
    assert_eq!(game.best_score(), Some(33));
    drop(game);

    // A new engine over a fresh store handle reads the same file.
    let revived = MatchGame::new(Difficulty::Easy, FileStore::new(&path), DeckRng::new(7));
    assert_eq!(revived.best_score(), Some(33));
}

#[test]
fn garbage_file_degrades_to_no_best_score() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    std::fs::write(&path, "][ not json").unwrap();

    let game = MatchGame::new(Difficulty::Easy, FileStore::new(&path), DeckRng::new(42));
    assert_eq!(game.best_score(), None);
}

#[test]
fn scores_for_other_grids_are_preserved() {
    let mut store = MemoryStore::new();
    store
        .set(BEST_SCORE_KEY, r#"{"16":72}"#)
        .unwrap();

    let mut game = MatchGame::new(Difficulty::Easy, store, DeckRng::new(42));
    let token = game.token();
    for _ in 0..20 {
        game.tick(token);
    }
    play_to_win(&mut game);

    let reloaded = BestScores::load(game.store());
    assert_eq!(reloaded.get(8), Some(20));
    assert_eq!(reloaded.get(16), Some(72));
}
