//! Runtime settings, assembled from defaults and `PACMAN_*` environment variables.

use std::path::PathBuf;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::constants::INITIAL_LIVES;
use crate::error::ConfigError;
use crate::variant::GameVariant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub variant: GameVariant,
    /// Seed for the simulation's random generator; drawn from the OS when unset.
    pub seed: Option<u64>,
    /// Where high scores are kept.
    pub data_dir: PathBuf,
    /// Directory with `.world` files replacing the built-in maps.
    pub map_dir: Option<PathBuf>,
    pub initial_lives: u8,
    pub coins: u32,
    /// Ticks the headless runner simulates before stopping.
    pub max_ticks: u64,
    /// Run the attract-mode demo level instead of a game.
    pub demo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: GameVariant::default(),
            seed: None,
            data_dir: PathBuf::from(".pacman"),
            map_dir: None,
            initial_lives: INITIAL_LIVES,
            coins: 1,
            max_ticks: 60 * 60 * 5,
            demo: false,
        }
    }
}

impl Settings {
    /// Loads the settings from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Figment::from(Serialized::defaults(Settings::default())).merge(Env::prefixed("PACMAN_")))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(|error| ConfigError::Extract(Box::new(error)))
    }
}
