//! World maps: the immutable tile grid a level is played on.

pub mod direction;
pub mod parser;
pub mod selector;

use std::collections::HashSet;

use bitflags::bitflags;
use glam::IVec2;
use pathfinding::prelude::bfs_reach;
use tracing::warn;

use crate::entity::ghost::GhostId;
use crate::map::direction::Direction;

bitflags! {
    /// Which kinds of actors may enter a tile.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TraversalFlags: u8 {
        const PAC = 1 << 0;
        const GHOST = 1 << 1;
        const ALL = Self::PAC.bits() | Self::GHOST.bits();
    }
}

/// Terrain layer of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Empty,
    Wall,
    /// Walkable, but slows ghosts down.
    Tunnel,
    /// The ghost house door; only crossed by ghosts entering or leaving the house.
    Door,
}

impl Terrain {
    pub fn traversal_flags(self) -> TraversalFlags {
        match self {
            Terrain::Empty | Terrain::Tunnel => TraversalFlags::ALL,
            Terrain::Door => TraversalFlags::GHOST,
            Terrain::Wall => TraversalFlags::empty(),
        }
    }
}

/// Food layer of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Food {
    None,
    Pellet,
    Energizer,
}

/// Named tile properties and the fallbacks used when a map does not declare them.
pub mod property {
    pub const PAC: &str = "pos_pac";
    pub const GHOST_STARTS: [&str; 4] = [
        "pos_ghost_1_red",
        "pos_ghost_2_pink",
        "pos_ghost_3_cyan",
        "pos_ghost_4_orange",
    ];
    pub const SCATTER: [&str; 4] = [
        "pos_scatter_red_ghost",
        "pos_scatter_pink_ghost",
        "pos_scatter_cyan_ghost",
        "pos_scatter_orange_ghost",
    ];
    pub const HOUSE_MIN: &str = "pos_house_min_tile";
    pub const HOUSE_MAX: &str = "pos_house_max_tile";
    pub const BONUS: &str = "pos_bonus";
    pub const ONE_WAY: &str = "oneway";

    pub const FALLBACK_PAC: (i32, i32) = (13, 26);
    pub const FALLBACK_GHOST_STARTS: [(i32, i32); 4] = [(13, 14), (13, 17), (11, 17), (15, 17)];
    pub const FALLBACK_SCATTER: [(i32, i32); 4] = [(25, 0), (2, 0), (27, 34), (0, 34)];
    pub const FALLBACK_HOUSE_MIN: (i32, i32) = (10, 15);
    pub const FALLBACK_HOUSE_MAX: (i32, i32) = (17, 19);
    pub const FALLBACK_BONUS: (i32, i32) = (13, 20);
}

/// The named positions every level needs, with fallbacks already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Landmarks {
    pac_start: IVec2,
    ghost_starts: [IVec2; 4],
    scatter: [IVec2; 4],
    house_min: IVec2,
    house_max: IVec2,
    bonus: IVec2,
}

impl Landmarks {
    fn resolve(map_name: &str, properties: &[(String, IVec2)]) -> Self {
        let lookup = |name: &str, fallback: (i32, i32)| {
            properties
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, tile)| *tile)
                .unwrap_or_else(|| {
                    warn!(map = map_name, property = name, ?fallback, "Map property missing, using fallback tile");
                    IVec2::from(fallback)
                })
        };
        Self {
            pac_start: lookup(property::PAC, property::FALLBACK_PAC),
            ghost_starts: std::array::from_fn(|i| lookup(property::GHOST_STARTS[i], property::FALLBACK_GHOST_STARTS[i])),
            scatter: std::array::from_fn(|i| lookup(property::SCATTER[i], property::FALLBACK_SCATTER[i])),
            house_min: lookup(property::HOUSE_MIN, property::FALLBACK_HOUSE_MIN),
            house_max: lookup(property::HOUSE_MAX, property::FALLBACK_HOUSE_MAX),
            bonus: lookup(property::BONUS, property::FALLBACK_BONUS),
        }
    }
}

/// An immutable tile grid with a terrain layer, a food layer and named positions.
#[derive(Debug, Clone)]
pub struct WorldMap {
    name: String,
    size: IVec2,
    terrain: Vec<Terrain>,
    food: Vec<Food>,
    properties: Vec<(String, IVec2)>,
    landmarks: Landmarks,
}

impl WorldMap {
    pub fn new(
        name: impl Into<String>,
        size: IVec2,
        terrain: Vec<Terrain>,
        food: Vec<Food>,
        properties: Vec<(String, IVec2)>,
    ) -> Self {
        debug_assert_eq!(terrain.len(), (size.x * size.y) as usize);
        debug_assert_eq!(food.len(), terrain.len());
        let name = name.into();
        let landmarks = Landmarks::resolve(&name, &properties);
        Self {
            name,
            size,
            terrain,
            food,
            properties,
            landmarks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the grid in tiles.
    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.size.x && tile.y < self.size.y
    }

    /// Linear index of a tile; only valid for tiles inside the grid.
    pub fn index(&self, tile: IVec2) -> usize {
        (tile.y * self.size.x + tile.x) as usize
    }

    /// Terrain at a tile. Tiles outside the grid are walls.
    pub fn terrain(&self, tile: IVec2) -> Terrain {
        if self.contains(tile) {
            self.terrain[self.index(tile)]
        } else {
            Terrain::Wall
        }
    }

    /// Initial food at a tile.
    pub fn food(&self, tile: IVec2) -> Food {
        if self.contains(tile) {
            self.food[self.index(tile)]
        } else {
            Food::None
        }
    }

    /// All tiles that start with food, row by row.
    pub fn food_tiles(&self) -> impl Iterator<Item = IVec2> + '_ {
        let width = self.size.x;
        self.food
            .iter()
            .enumerate()
            .filter(|(_, food)| **food != Food::None)
            .map(move |(index, _)| IVec2::new(index as i32 % width, index as i32 / width))
    }

    pub fn total_food(&self) -> usize {
        self.food.iter().filter(|food| **food != Food::None).count()
    }

    pub fn is_tunnel(&self, tile: IVec2) -> bool {
        self.terrain(self.wrap(tile)) == Terrain::Tunnel
    }

    /// A row whose two border tiles are open connects both sides of the maze.
    pub fn is_portal_row(&self, y: i32) -> bool {
        y >= 0
            && y < self.size.y
            && self.terrain(IVec2::new(0, y)) != Terrain::Wall
            && self.terrain(IVec2::new(self.size.x - 1, y)) != Terrain::Wall
    }

    /// Wraps a tile horizontally through the portals.
    pub fn wrap(&self, tile: IVec2) -> IVec2 {
        if self.is_portal_row(tile.y) {
            IVec2::new(tile.x.rem_euclid(self.size.x), tile.y)
        } else {
            tile
        }
    }

    /// Whether an actor with the given flags may enter a tile. Tiles just beyond a portal
    /// count as open.
    pub fn can_enter(&self, tile: IVec2, flags: TraversalFlags) -> bool {
        if !self.contains(tile) {
            return self.is_portal_row(tile.y);
        }
        self.terrain(tile).traversal_flags().contains(flags)
    }

    /// First value of a named property.
    pub fn property(&self, name: &str) -> Option<IVec2> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, tile)| *tile)
    }

    /// All values of a repeatable property.
    pub fn properties(&self, name: &str) -> Vec<IVec2> {
        self.properties
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, tile)| *tile)
            .collect()
    }

    pub fn pac_start_tile(&self) -> IVec2 {
        self.landmarks.pac_start
    }

    pub fn ghost_start_tile(&self, id: GhostId) -> IVec2 {
        self.landmarks.ghost_starts[id.index()]
    }

    pub fn scatter_tile(&self, id: GhostId) -> IVec2 {
        self.landmarks.scatter[id.index()]
    }

    pub fn house_min_tile(&self) -> IVec2 {
        self.landmarks.house_min
    }

    pub fn house_max_tile(&self) -> IVec2 {
        self.landmarks.house_max
    }

    pub fn bonus_tile(&self) -> IVec2 {
        self.landmarks.bonus
    }

    /// Tiles from which hunting ghosts may not turn upwards.
    pub fn one_way_tiles(&self) -> Vec<IVec2> {
        self.properties(property::ONE_WAY)
    }

    /// Food tiles that Pac cannot reach from its start tile.
    pub fn unreachable_food(&self) -> Vec<IVec2> {
        let start = self.pac_start_tile();
        let reachable: HashSet<IVec2> = bfs_reach(start, |tile| {
            let tile = *tile;
            Direction::DIRECTIONS
                .iter()
                .map(move |dir| self.wrap(tile + dir.as_ivec2()))
                .filter(|next| self.can_enter(*next, TraversalFlags::PAC))
                .collect::<Vec<_>>()
        })
        .collect();
        self.food_tiles().filter(|tile| !reachable.contains(tile)).collect()
    }
}
