use std::fs;

use pacman_arcade::error::PersistenceError;
use pacman_arcade::game::score::ScoreManager;
use pacman_arcade::game::GameModel;
use pacman_arcade::map::selector::MapSelector;
use pacman_arcade::persistence::{
    load_or_default, CoinMechanism, CoinStore, FileHighScoreStore, HighScore, HighScoreStore,
};
use pacman_arcade::variant::GameVariant;
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use speculoos::prelude::*;

#[test]
fn test_missing_high_score_file_is_zero() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileHighScoreStore::new(dir.path(), GameVariant::PacMan);
    assert_eq!(store.load().unwrap(), HighScore::default());
    assert_that(&store.path().ends_with("highscore-pacman.json")).is_true();
}

#[test]
fn test_high_score_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileHighScoreStore::new(&dir.path().join("nested"), GameVariant::MsPacMan);
    store.save(&HighScore { points: 12_340, level: 4 }).unwrap();

    let reopened = FileHighScoreStore::new(&dir.path().join("nested"), GameVariant::MsPacMan);
    assert_eq!(reopened.load().unwrap(), HighScore { points: 12_340, level: 4 });

    // Variants keep separate records.
    let other = FileHighScoreStore::new(&dir.path().join("nested"), GameVariant::PacManXxl);
    assert_eq!(other.load().unwrap(), HighScore::default());
}

#[test]
fn test_malformed_high_score_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileHighScoreStore::new(dir.path(), GameVariant::PacMan);
    fs::write(store.path(), "not json").unwrap();

    assert_that(&matches!(store.load(), Err(PersistenceError::Malformed(_)))).is_true();
    assert_eq!(load_or_default(&store), HighScore::default());

    let manager = ScoreManager::new(Box::new(store));
    assert_that(&manager.high_score().points).is_equal_to(0);
}

#[test]
fn test_game_end_saves_improved_high_score() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = GameModel::new(
        GameVariant::PacMan.rule_set(),
        MapSelector::builtin(GameVariant::PacMan).unwrap(),
        SmallRng::seed_from_u64(5),
        Box::new(CoinMechanism::new(2)),
        Box::new(FileHighScoreStore::new(dir.path(), GameVariant::PacMan)),
    );
    game.start_new_game().unwrap();
    game.start_level();
    let tile = game.level().unwrap().map().food_tiles().next().unwrap();
    game.on_pellet_eaten(tile);
    game.on_game_ending();

    let saved = FileHighScoreStore::new(dir.path(), GameVariant::PacMan).load().unwrap();
    assert_eq!(saved, HighScore { points: 10, level: 1 });
    assert_that(&game.coins().num_coins()).is_equal_to(1);
    assert_that(&game.can_start_new_game()).is_true();
}

#[test]
fn test_coin_slot_limits() {
    let mut coins = CoinMechanism::new(500);
    assert_that(&coins.num_coins()).is_equal_to(CoinMechanism::MAX_COINS);
    coins.insert_coin();
    assert_that(&coins.num_coins()).is_equal_to(99);

    let mut empty = CoinMechanism::new(0);
    assert_that(&empty.is_empty()).is_true();
    empty.consume_coin();
    assert_that(&empty.num_coins()).is_equal_to(0);
    empty.insert_coin();
    assert_that(&empty.is_empty()).is_false();
}
