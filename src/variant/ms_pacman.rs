use rand::rngs::SmallRng;
use rand::Rng;

use crate::constants::INDEFINITE;
use crate::entity::ghost::{GhostId, Steering};
use crate::game::level::GameLevel;
use crate::variant::{classic_steering, GameVariant, RuleSet};

const HUNTING_TICKS_LEVEL_1_TO_4: [u32; 8] = [420, 1200, 1, 62220, 1, 62220, 1, INDEFINITE];
const HUNTING_TICKS_LEVEL_5_PLUS: [u32; 8] = [300, 1200, 1, 62220, 1, 62220, 1, INDEFINITE];

/// Cherries, strawberry, orange, pretzel, apple, pear, banana.
const BONUS_POINTS: [u32; 7] = [100, 200, 500, 700, 1000, 2000, 5000];

/// Upper bounds of the weighted random bonus pick from level 8 on, out of 320.
const RANDOM_BONUS_WEIGHTS: [u32; 6] = [50, 100, 150, 200, 240, 280];

/// Ms. Pac-Man: four mazes, random bonus symbols in later levels, and red and pink roam
/// randomly during the first scatter phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsPacManRules;

impl RuleSet for MsPacManRules {
    fn variant(&self) -> GameVariant {
        GameVariant::MsPacMan
    }

    fn hunting_ticks(&self, level: u32, phase: usize) -> u32 {
        let table = if level <= 4 {
            &HUNTING_TICKS_LEVEL_1_TO_4
        } else {
            &HUNTING_TICKS_LEVEL_5_PLUS
        };
        table[phase.min(table.len() - 1)]
    }

    fn map_number(&self, level: u32) -> usize {
        match level {
            0..=2 => 1,
            3..=5 => 2,
            6..=9 => 3,
            10..=13 => 4,
            _ if (level - 14) % 8 < 4 => 3,
            _ => 4,
        }
    }

    fn bonus_thresholds(&self) -> [usize; 2] {
        [64, 176]
    }

    fn bonus_symbol(&self, level: u32, _index: usize, rng: &mut SmallRng) -> u8 {
        if (1..=7).contains(&level) {
            return (level - 1) as u8;
        }
        let roll = rng.random_range(0..320);
        RANDOM_BONUS_WEIGHTS
            .iter()
            .position(|bound| roll < *bound)
            .unwrap_or(RANDOM_BONUS_WEIGHTS.len()) as u8
    }

    fn bonus_points(&self, symbol: u8) -> u32 {
        BONUS_POINTS[(symbol as usize).min(BONUS_POINTS.len() - 1)]
    }

    fn hunting_steering(&self, level: &GameLevel, id: GhostId) -> Steering {
        let roaming = matches!(id, GhostId::Red | GhostId::Pink)
            && level.hunting_timer().phase_index() == 0
            && !level.elroy().is_active();
        if roaming {
            Steering::Random
        } else {
            classic_steering(level, id)
        }
    }
}
