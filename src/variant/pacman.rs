use rand::rngs::SmallRng;

use crate::constants::INDEFINITE;
use crate::variant::{GameVariant, RuleSet};

const HUNTING_TICKS_LEVEL_1: [u32; 8] = [420, 1200, 420, 1200, 300, 1200, 300, INDEFINITE];
const HUNTING_TICKS_LEVEL_2_TO_4: [u32; 8] = [420, 1200, 420, 1200, 300, 61980, 1, INDEFINITE];
const HUNTING_TICKS_LEVEL_5_PLUS: [u32; 8] = [300, 1200, 300, 1200, 300, 62262, 1, INDEFINITE];

/// Cherries, strawberry, peach, apple, grapes, galaxian, bell, key.
const BONUS_POINTS: [u32; 8] = [100, 300, 500, 700, 1000, 2000, 3000, 5000];

/// The hunting phase durations of the original arcade game.
pub(crate) fn pacman_hunting_ticks(level: u32, phase: usize) -> u32 {
    let table = match level {
        0 | 1 => &HUNTING_TICKS_LEVEL_1,
        2..=4 => &HUNTING_TICKS_LEVEL_2_TO_4,
        _ => &HUNTING_TICKS_LEVEL_5_PLUS,
    };
    table[phase.min(table.len() - 1)]
}

pub(crate) fn pacman_bonus_symbol(level: u32) -> u8 {
    match level {
        0 | 1 => 0,
        2 => 1,
        3 | 4 => 2,
        5 | 6 => 3,
        7 | 8 => 4,
        9 | 10 => 5,
        11 | 12 => 6,
        _ => 7,
    }
}

pub(crate) fn pacman_bonus_points(symbol: u8) -> u32 {
    BONUS_POINTS[(symbol as usize).min(BONUS_POINTS.len() - 1)]
}

/// Pac-Man: a single maze, bonus symbols fixed per level.
#[derive(Debug, Clone, Copy, Default)]
pub struct PacManRules;

impl RuleSet for PacManRules {
    fn variant(&self) -> GameVariant {
        GameVariant::PacMan
    }

    fn hunting_ticks(&self, level: u32, phase: usize) -> u32 {
        pacman_hunting_ticks(level, phase)
    }

    fn map_number(&self, _level: u32) -> usize {
        1
    }

    fn bonus_thresholds(&self) -> [usize; 2] {
        [70, 170]
    }

    fn bonus_symbol(&self, level: u32, _index: usize, _rng: &mut SmallRng) -> u8 {
        pacman_bonus_symbol(level)
    }

    fn bonus_points(&self, symbol: u8) -> u32 {
        pacman_bonus_points(symbol)
    }
}
