//! Collaborators the game model talks to but does not own the state of: the high-score store
//! and the coin mechanism.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PersistenceError;
use crate::variant::GameVariant;

/// The best result achieved so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub points: u32,
    pub level: u32,
}

pub trait HighScoreStore {
    fn load(&self) -> Result<HighScore, PersistenceError>;
    fn save(&mut self, score: &HighScore) -> Result<(), PersistenceError>;
}

/// Keeps the high score for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryHighScoreStore {
    score: HighScore,
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<HighScore, PersistenceError> {
        Ok(self.score)
    }

    fn save(&mut self, score: &HighScore) -> Result<(), PersistenceError> {
        self.score = *score;
        Ok(())
    }
}

/// Stores the high score of one variant as JSON under a data directory.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(data_dir: &Path, variant: GameVariant) -> Self {
        Self {
            path: data_dir.join(format!("highscore-{variant}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    /// A missing file is not an error: nobody has played yet.
    fn load(&self) -> Result<HighScore, PersistenceError> {
        if !self.path.exists() {
            return Ok(HighScore::default());
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&mut self, score: &HighScore) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(score)?)?;
        debug!(path = %self.path.display(), points = score.points, "High score saved");
        Ok(())
    }
}

/// Loads a high score, falling back to zero when the store cannot be read.
pub fn load_or_default(store: &dyn HighScoreStore) -> HighScore {
    store.load().unwrap_or_else(|error| {
        warn!(%error, "High score could not be loaded, starting from zero");
        HighScore::default()
    })
}

pub trait CoinStore {
    fn is_empty(&self) -> bool;
    fn consume_coin(&mut self);
    fn num_coins(&self) -> u32;
}

/// A coin slot holding up to [`CoinMechanism::MAX_COINS`] credits.
#[derive(Debug, Clone, Default)]
pub struct CoinMechanism {
    coins: u32,
}

impl CoinMechanism {
    pub const MAX_COINS: u32 = 99;

    pub fn new(coins: u32) -> Self {
        Self {
            coins: coins.min(Self::MAX_COINS),
        }
    }

    pub fn insert_coin(&mut self) {
        self.coins = (self.coins + 1).min(Self::MAX_COINS);
    }
}

impl CoinStore for CoinMechanism {
    fn is_empty(&self) -> bool {
        self.coins == 0
    }

    fn consume_coin(&mut self) {
        self.coins = self.coins.saturating_sub(1);
    }

    fn num_coins(&self) -> u32 {
        self.coins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_mechanism_bounds() {
        let mut coins = CoinMechanism::new(200);
        assert_eq!(coins.num_coins(), CoinMechanism::MAX_COINS);
        coins.insert_coin();
        assert_eq!(coins.num_coins(), CoinMechanism::MAX_COINS);

        let mut coins = CoinMechanism::new(1);
        coins.consume_coin();
        coins.consume_coin();
        assert!(coins.is_empty());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryHighScoreStore::default();
        store.save(&HighScore { points: 4200, level: 3 }).unwrap();
        assert_eq!(store.load().unwrap().points, 4200);
    }
}
