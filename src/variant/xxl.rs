use rand::rngs::SmallRng;

use crate::variant::pacman::{pacman_bonus_points, pacman_bonus_symbol, pacman_hunting_ticks};
use crate::variant::{GameVariant, RuleSet};

/// Pac-Man XXL: the Pac-Man rules played on a rotation of all built-in mazes, without
/// intermissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PacManXxlRules;

impl RuleSet for PacManXxlRules {
    fn variant(&self) -> GameVariant {
        GameVariant::PacManXxl
    }

    fn hunting_ticks(&self, level: u32, phase: usize) -> u32 {
        pacman_hunting_ticks(level, phase)
    }

    fn map_number(&self, level: u32) -> usize {
        (level.max(1) as usize - 1) % 5 + 1
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

    fn intermission(&self, _level: u32) -> Option<u8> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_rotation() {
        let rules = PacManXxlRules;
        let maps: Vec<usize> = (1..=7).map(|level| rules.map_number(level)).collect();
        assert_eq!(maps, vec![1, 2, 3, 4, 5, 1, 2]);
    }
}
