//! Game variants. Each variant is a [`RuleSet`]: the tables and the few behaviours in which
//! Pac-Man, Ms. Pac-Man and Pac-Man XXL differ.

mod ms_pacman;
mod pacman;
mod xxl;

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::entity::ghost::{chase_target, GhostId, Steering};
use crate::game::level::GameLevel;
use crate::game::level_data::LevelData;

pub use ms_pacman::MsPacManRules;
pub use pacman::PacManRules;
pub use xxl::PacManXxlRules;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum GameVariant {
    #[default]
    #[serde(rename = "pacman")]
    #[strum(serialize = "pacman")]
    PacMan,
    #[serde(rename = "ms_pacman")]
    #[strum(serialize = "ms_pacman")]
    MsPacMan,
    #[serde(rename = "pacman_xxl")]
    #[strum(serialize = "pacman_xxl")]
    PacManXxl,
}

impl GameVariant {
    pub fn rule_set(self) -> Box<dyn RuleSet> {
        match self {
            GameVariant::PacMan => Box::new(PacManRules),
            GameVariant::MsPacMan => Box::new(MsPacManRules),
            GameVariant::PacManXxl => Box::new(PacManXxlRules),
        }
    }
}

/// The variant-specific parts of the game rules.
pub trait RuleSet {
    fn variant(&self) -> GameVariant;

    /// Duration in ticks of a hunting phase (0-7) on a level. The last phase is indefinite.
    fn hunting_ticks(&self, level: u32, phase: usize) -> u32;

    /// 1-based number of the map a level is played on.
    fn map_number(&self, level: u32) -> usize;

    /// Food counts at which the first and second bonus appear.
    fn bonus_thresholds(&self) -> [usize; 2];

    /// Symbol of the first (`index` 0) or second bonus of a level.
    fn bonus_symbol(&self, level: u32, index: usize, rng: &mut SmallRng) -> u8;

    fn bonus_points(&self, symbol: u8) -> u32;

    fn level_data(&self, level: u32) -> LevelData {
        LevelData::for_level(level)
    }

    /// Intermission played after a level is completed.
    fn intermission(&self, level: u32) -> Option<u8> {
        match self.level_data(level).intermission {
            0 => None,
            number => Some(number),
        }
    }

    /// How a ghost in `HuntingPac` steers.
    fn hunting_steering(&self, level: &GameLevel, id: GhostId) -> Steering {
        classic_steering(level, id)
    }
}

/// Scatter tile in scatter phases, chase target in chase phases or while cruise Elroy is on.
pub fn classic_steering(level: &GameLevel, id: GhostId) -> Steering {
    let chasing = level.hunting_timer().is_chase() || (id == GhostId::Red && level.elroy().is_active());
    if chasing {
        Steering::Target(chase_target(id, &level.chase_input(id)))
    } else {
        Steering::Target(level.map().scatter_tile(id))
    }
}
