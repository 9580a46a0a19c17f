//! Resolves map numbers chosen by a rule set to loaded world maps.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::constants::ARCADE_TILES;
use crate::error::{GameResult, MapError};
use crate::map::parser::MapTileParser;
use crate::map::WorldMap;
use crate::variant::GameVariant;

const PACMAN: &str = include_str!("../../assets/maps/pacman.world");
const MS_PACMAN_1: &str = include_str!("../../assets/maps/ms_pacman_1.world");
const MS_PACMAN_2: &str = include_str!("../../assets/maps/ms_pacman_2.world");
const MS_PACMAN_3: &str = include_str!("../../assets/maps/ms_pacman_3.world");
const MS_PACMAN_4: &str = include_str!("../../assets/maps/ms_pacman_4.world");

/// The file stems of the maps each variant plays, in map-number order.
pub fn map_names(variant: GameVariant) -> &'static [&'static str] {
    match variant {
        GameVariant::PacMan => &["pacman"],
        GameVariant::MsPacMan => &["ms_pacman_1", "ms_pacman_2", "ms_pacman_3", "ms_pacman_4"],
        GameVariant::PacManXxl => &["pacman", "ms_pacman_1", "ms_pacman_2", "ms_pacman_3", "ms_pacman_4"],
    }
}

fn builtin_text(name: &str) -> Option<&'static str> {
    match name {
        "pacman" => Some(PACMAN),
        "ms_pacman_1" => Some(MS_PACMAN_1),
        "ms_pacman_2" => Some(MS_PACMAN_2),
        "ms_pacman_3" => Some(MS_PACMAN_3),
        "ms_pacman_4" => Some(MS_PACMAN_4),
        _ => None,
    }
}

/// An ordered collection of maps addressed by 1-based map number.
#[derive(Debug, Clone)]
pub struct MapSelector {
    maps: Vec<Arc<WorldMap>>,
}

impl MapSelector {
    pub fn from_maps(maps: Vec<WorldMap>) -> Self {
        Self {
            maps: maps.into_iter().map(Arc::new).collect(),
        }
    }

    /// The maps compiled into the crate for a variant.
    pub fn builtin(variant: GameVariant) -> GameResult<Self> {
        let maps = map_names(variant)
            .iter()
            .map(|name| {
                let text = builtin_text(name).ok_or_else(|| MapError::MissingMap(0))?;
                Self::parse_checked(name, text)
            })
            .collect::<GameResult<Vec<_>>>()?;
        Ok(Self::from_maps(maps))
    }

    /// Loads `<stem>.world` files for a variant from a directory.
    ///
    /// # Errors
    ///
    /// Fails if any of the variant's map files is missing or malformed.
    pub fn from_dir(dir: &Path, variant: GameVariant) -> GameResult<Self> {
        let maps = map_names(variant)
            .iter()
            .map(|name| {
                let path = dir.join(format!("{name}.world"));
                let text = std::fs::read_to_string(&path).map_err(|source| MapError::Unreadable {
                    path: path.clone(),
                    source,
                })?;
                Self::parse_checked(name, &text)
            })
            .collect::<GameResult<Vec<_>>>()?;
        Ok(Self::from_maps(maps))
    }

    fn parse_checked(name: &str, text: &str) -> GameResult<WorldMap> {
        let map = MapTileParser::parse_world(name, text).map_err(|source| MapError::Invalid {
            name: name.to_string(),
            source,
        })?;
        if map.size() != ARCADE_TILES.as_ivec2() {
            warn!(map = name, size = ?map.size(), "Map does not match the arcade screen size");
        }
        let unreachable = map.unreachable_food();
        if !unreachable.is_empty() {
            warn!(map = name, count = unreachable.len(), first = ?unreachable[0], "Map has food Pac cannot reach");
        }
        debug!(map = name, food = map.total_food(), "Loaded world map");
        Ok(map)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Looks up a map by its 1-based number.
    pub fn select(&self, number: usize) -> Result<Arc<WorldMap>, MapError> {
        number
            .checked_sub(1)
            .and_then(|index| self.maps.get(index))
            .cloned()
            .ok_or(MapError::MissingMap(number))
    }
}
