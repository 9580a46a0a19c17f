//! Score keeping: points, the high score and extra lives.

use std::fmt;

use tracing::{info, warn};

use crate::constants::score::EXTRA_LIFE;
use crate::persistence::{load_or_default, HighScore, HighScoreStore};

/// What adding points caused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreChange {
    /// Extra lives granted by this addition, one per threshold crossed.
    pub extra_lives: u8,
    pub new_high_score: bool,
}

pub struct ScoreManager {
    score: u32,
    high_score: HighScore,
    high_score_at_start: u32,
    extra_life_scores: Vec<u32>,
    extra_lives_granted: usize,
    enabled: bool,
    store: Box<dyn HighScoreStore>,
}

impl fmt::Debug for ScoreManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreManager")
            .field("score", &self.score)
            .field("high_score", &self.high_score)
            .field("extra_lives_granted", &self.extra_lives_granted)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl ScoreManager {
    pub fn new(store: Box<dyn HighScoreStore>) -> Self {
        let high_score = load_or_default(store.as_ref());
        Self {
            score: 0,
            high_score_at_start: high_score.points,
            high_score,
            extra_life_scores: vec![EXTRA_LIFE],
            extra_lives_granted: 0,
            enabled: false,
            store,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> HighScore {
        self.high_score
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Points are only counted while enabled, which is never the case in demo levels.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_extra_life_scores(&mut self, scores: Vec<u32>) {
        self.extra_life_scores = scores;
    }

    /// Zeroes the score and reloads the high score for a new game.
    pub fn reset(&mut self) {
        self.score = 0;
        self.extra_lives_granted = 0;
        self.high_score = load_or_default(self.store.as_ref());
        self.high_score_at_start = self.high_score.points;
    }

    pub fn add(&mut self, points: u32, level: u32) -> ScoreChange {
        let mut change = ScoreChange::default();
        if !self.enabled {
            return change;
        }
        self.score = self.score.saturating_add(points);

        while let Some(&threshold) = self.extra_life_scores.get(self.extra_lives_granted) {
            if self.score < threshold {
                break;
            }
            self.extra_lives_granted += 1;
            change.extra_lives += 1;
        }
        if self.score > self.high_score.points {
            self.high_score = HighScore {
                points: self.score,
                level,
            };
            change.new_high_score = true;
        }
        change
    }

    /// Writes the high score if this game improved it. Failures are logged, not returned.
    pub fn save_high_score(&mut self) {
        if self.high_score.points <= self.high_score_at_start {
            return;
        }
        match self.store.save(&self.high_score) {
            Ok(()) => {
                info!(points = self.high_score.points, level = self.high_score.level, "New high score");
                self.high_score_at_start = self.high_score.points;
            }
            Err(error) => warn!(%error, "High score could not be saved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryHighScoreStore;

    #[test]
    fn test_disabled_ignores_points() {
        let mut score = ScoreManager::new(Box::new(MemoryHighScoreStore::default()));
        assert_eq!(score.add(100, 1), ScoreChange::default());
        assert_eq!(score.score(), 0);
    }

    #[test]
    fn test_extra_life_once() {
        let mut score = ScoreManager::new(Box::new(MemoryHighScoreStore::default()));
        score.set_enabled(true);
        assert_eq!(score.add(9_990, 1).extra_lives, 0);
        assert_eq!(score.add(10, 1).extra_lives, 1);
        assert_eq!(score.add(10_000, 1).extra_lives, 0);
        assert_eq!(score.high_score().points, 20_000);
    }

    #[test]
    fn test_one_addition_can_cross_several_thresholds() {
        let mut score = ScoreManager::new(Box::new(MemoryHighScoreStore::default()));
        score.set_enabled(true);
        score.set_extra_life_scores(vec![10_000, 50_000, 200_000]);
        assert_eq!(score.add(60_000, 3).extra_lives, 2);
        assert_eq!(score.add(10, 3).extra_lives, 0);
        assert_eq!(score.add(140_000, 3).extra_lives, 1);
        assert_eq!(score.add(500_000, 3).extra_lives, 0);
    }
}
