//! Ghost entity: identity, state machine, house choreography and maze steering.

use glam::{IVec2, Vec2};
use rand::Rng;
use strum_macros::{Display, EnumIter, IntoStaticStr};
use tracing::trace;

use crate::constants::TILE_SIZE;
use crate::entity::{half_tile_right_of, Motion};
use crate::map::direction::Direction;
use crate::map::{Terrain, TraversalFlags, WorldMap};

/// The four ghosts, in release order. The discriminant doubles as the index into the
/// level's ghost array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, IntoStaticStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum GhostId {
    Red = 0,
    Pink = 1,
    Cyan = 2,
    Orange = 3,
}

impl GhostId {
    pub const ALL: [GhostId; 4] = [GhostId::Red, GhostId::Pink, GhostId::Cyan, GhostId::Orange];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The arcade nickname of the ghost.
    pub fn nickname(self) -> &'static str {
        match self {
            GhostId::Red => "Blinky",
            GhostId::Pink => "Pinky",
            GhostId::Cyan => "Inky",
            GhostId::Orange => "Clyde",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum GhostState {
    /// Waiting inside the house.
    Locked,
    LeavingHouse,
    HuntingPac,
    Frightened,
    /// Just eaten, showing its value while the game is frozen.
    Eaten,
    /// Eyes travelling back to the house entry.
    ReturningHome,
    EnteringHouse,
}

/// How a ghost picks its direction when it enters a new tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    Target(IVec2),
    Random,
}

/// Cruise Elroy state of the red ghost. The tier is kept while suspended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CruiseElroy {
    tier: u8,
    suspended: bool,
}

impl CruiseElroy {
    pub fn tier(&self) -> u8 {
        self.tier
    }

    /// The tier that currently applies: zero while suspended.
    pub fn effective_tier(&self) -> u8 {
        if self.suspended {
            0
        } else {
            self.tier
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn is_active(&self) -> bool {
        self.effective_tier() > 0
    }

    /// Raises the tier if the remaining food crossed a threshold. Returns `true` on upgrade.
    pub fn update(&mut self, food_remaining: usize, elroy1_dots: usize, elroy2_dots: usize) -> bool {
        let wanted = if food_remaining <= elroy2_dots {
            2
        } else if food_remaining <= elroy1_dots {
            1
        } else {
            0
        };
        if wanted > self.tier {
            self.tier = wanted;
            true
        } else {
            false
        }
    }

    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }
}

/// What happened to a ghost during one movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostStepEvent {
    LeftHouse,
    EnteredHouse,
    Revived,
}

/// Per-step inputs computed by the level and the rule set.
pub struct GhostStep<'a> {
    pub map: &'a WorldMap,
    pub speed: f32,
    pub steering: Steering,
    /// The ghost turns frightened rather than hunting when it steps out of the house.
    pub frightened_on_exit: bool,
}

#[derive(Debug, Clone)]
pub struct Ghost {
    id: GhostId,
    pub motion: Motion,
    state: GhostState,
    start_position: Vec2,
    revival_position: Vec2,
    house_entry: Vec2,
    special_tiles: Vec<IVec2>,
    reverse_pending: bool,
}

impl Ghost {
    /// Creates a ghost at its start position on `map`.
    pub fn new(id: GhostId, map: &WorldMap) -> Self {
        let start_position = half_tile_right_of(map.ghost_start_tile(id));
        let revival_position = match id {
            GhostId::Red => half_tile_right_of(map.ghost_start_tile(GhostId::Pink)),
            _ => start_position,
        };
        let house_entry = half_tile_right_of(map.ghost_start_tile(GhostId::Red));
        let start_dir = match id {
            GhostId::Red => Direction::Left,
            GhostId::Pink => Direction::Down,
            GhostId::Cyan | GhostId::Orange => Direction::Up,
        };
        Self {
            id,
            motion: Motion::new(start_position, start_dir),
            state: GhostState::Locked,
            start_position,
            revival_position,
            house_entry,
            special_tiles: map.one_way_tiles(),
            reverse_pending: false,
        }
    }

    pub fn id(&self) -> GhostId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.into()
    }

    pub fn state(&self) -> GhostState {
        self.state
    }

    pub fn set_state(&mut self, state: GhostState) {
        if self.state != state {
            trace!(ghost = self.name(), from = ?self.state, to = ?state, "Ghost state change");
            self.state = state;
        }
    }

    pub fn tile(&self) -> IVec2 {
        self.motion.tile()
    }

    pub fn position(&self) -> Vec2 {
        self.motion.position
    }

    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    pub fn revival_position(&self) -> Vec2 {
        self.revival_position
    }

    pub fn house_entry(&self) -> Vec2 {
        self.house_entry
    }

    pub fn special_tiles(&self) -> &[IVec2] {
        &self.special_tiles
    }

    pub fn is_reverse_pending(&self) -> bool {
        self.reverse_pending
    }

    pub fn request_reverse(&mut self) {
        self.reverse_pending = true;
    }

    /// Puts the ghost back on its start position, locked, with no pending reversal.
    pub fn reset(&mut self) {
        let dir = match self.id {
            GhostId::Red => Direction::Left,
            GhostId::Pink => Direction::Down,
            GhostId::Cyan | GhostId::Orange => Direction::Up,
        };
        self.motion = Motion::new(self.start_position, dir);
        self.state = GhostState::Locked;
        self.reverse_pending = false;
    }

    /// Whether the ghost stands outside the house and can start hunting right away.
    pub fn is_outside_house(&self) -> bool {
        self.motion.position.y <= self.house_entry.y
    }

    /// Tiles a ghost walking the maze may enter. The door is only crossed by the house
    /// choreography.
    pub fn can_enter(map: &WorldMap, tile: IVec2) -> bool {
        map.can_enter(tile, TraversalFlags::GHOST) && map.terrain(map.wrap(tile)) != Terrain::Door
    }

    /// Advances the ghost by one tick according to its state.
    pub fn step(&mut self, input: &GhostStep<'_>, rng: &mut impl Rng) -> Option<GhostStepEvent> {
        match self.state {
            GhostState::Locked | GhostState::Eaten => None,
            GhostState::LeavingHouse => self.leave_house(input),
            GhostState::EnteringHouse => self.enter_house(input.speed),
            GhostState::HuntingPac | GhostState::Frightened => {
                if self.reverse_pending {
                    self.motion.reverse();
                    self.reverse_pending = false;
                }
                self.move_in_maze(input, rng);
                None
            }
            GhostState::ReturningHome => {
                if !self.is_above_door() {
                    self.move_in_maze(input, rng);
                    return None;
                }
                if self.motion.move_towards(self.house_entry, input.speed) {
                    self.motion.move_dir = Direction::Down;
                    self.motion.wish_dir = Direction::Down;
                    self.set_state(GhostState::EnteringHouse);
                    return Some(GhostStepEvent::EnteredHouse);
                }
                None
            }
        }
    }

    /// Whether the ghost stands on one of the two tiles the house entry lies between.
    pub fn is_above_door(&self) -> bool {
        let tile = self.tile();
        let entry = (self.house_entry / TILE_SIZE).floor().as_ivec2();
        tile.y == entry.y && (tile.x == entry.x || tile.x == entry.x - 1)
    }

    fn leave_house(&mut self, input: &GhostStep<'_>) -> Option<GhostStepEvent> {
        let position = self.motion.position;
        let arrived = if (position.x - self.house_entry.x).abs() > f32::EPSILON {
            self.motion.move_towards(Vec2::new(self.house_entry.x, position.y), input.speed);
            false
        } else {
            self.motion.move_towards(self.house_entry, input.speed)
        };
        if !arrived {
            return None;
        }

        // A reversal signalled while inside the house sends the ghost right instead of left.
        let dir = if self.reverse_pending {
            Direction::Right
        } else {
            Direction::Left
        };
        self.reverse_pending = false;
        self.motion.move_dir = dir;
        self.motion.wish_dir = dir;
        self.set_state(if input.frightened_on_exit {
            GhostState::Frightened
        } else {
            GhostState::HuntingPac
        });
        Some(GhostStepEvent::LeftHouse)
    }

    fn enter_house(&mut self, speed: f32) -> Option<GhostStepEvent> {
        let position = self.motion.position;
        if position.y < self.revival_position.y - f32::EPSILON {
            self.motion.move_towards(Vec2::new(self.house_entry.x, self.revival_position.y), speed);
            return None;
        }
        if self.motion.move_towards(self.revival_position, speed) {
            self.set_state(GhostState::LeavingHouse);
            return Some(GhostStepEvent::Revived);
        }
        None
    }

    fn move_in_maze(&mut self, input: &GhostStep<'_>, rng: &mut impl Rng) {
        let map = input.map;
        let result = self.motion.move_with(map, input.speed, |tile| Self::can_enter(map, tile));
        if result.new_tile_entered || result.blocked {
            self.motion.wish_dir = match input.steering {
                Steering::Target(target) => self.direction_towards(map, target),
                Steering::Random => self.random_direction(map, rng),
            };
        }
    }

    /// Legal directions out of the current tile, excluding the reverse of the current one.
    fn open_directions<'a>(&'a self, map: &'a WorldMap) -> impl Iterator<Item = Direction> + 'a {
        let tile = self.tile();
        let reverse = self.motion.move_dir.opposite();
        let no_up = self.state == GhostState::HuntingPac && self.special_tiles.contains(&tile);
        Direction::DIRECTIONS
            .into_iter()
            .filter(move |dir| *dir != reverse)
            .filter(move |dir| !(no_up && *dir == Direction::Up))
            .filter(move |dir| Self::can_enter(map, tile + dir.as_ivec2()))
    }

    /// The open direction whose neighbour tile is closest to `target`; ties keep the
    /// UP, LEFT, DOWN, RIGHT order. A dead end reverses.
    pub fn direction_towards(&self, map: &WorldMap, target: IVec2) -> Direction {
        let tile = self.tile();
        let mut best: Option<(i32, Direction)> = None;
        for dir in self.open_directions(map) {
            let distance = (tile + dir.as_ivec2()).distance_squared(target);
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, dir));
            }
        }
        best.map_or(self.motion.move_dir.opposite(), |(_, dir)| dir)
    }

    /// A random open direction; blocked or reversing draws fall back to priority order.
    pub fn random_direction(&self, map: &WorldMap, rng: &mut impl Rng) -> Direction {
        let drawn = Direction::DIRECTIONS[rng.random_range(0..4)];
        let mut open = self.open_directions(map).peekable();
        let first = open.peek().copied();
        if open.any(|dir| dir == drawn) {
            drawn
        } else {
            first.unwrap_or(self.motion.move_dir.opposite())
        }
    }
}

/// The tile `n` tiles ahead of Pac. Facing up also shifts the tile `n` to the left, which
/// reproduces the arcade's pointer overflow.
pub fn tiles_ahead(pac_tile: IVec2, pac_dir: Direction, n: i32) -> IVec2 {
    let ahead = pac_tile + pac_dir.as_ivec2() * n;
    if pac_dir == Direction::Up {
        ahead - IVec2::new(n, 0)
    } else {
        ahead
    }
}

/// Everything the classic chase targets depend on.
#[derive(Debug, Clone, Copy)]
pub struct ChaseInput {
    pub pac_tile: IVec2,
    pub pac_dir: Direction,
    pub red_tile: IVec2,
    pub ghost_tile: IVec2,
    pub scatter_tile: IVec2,
}

/// Classic chase target of a ghost.
pub fn chase_target(id: GhostId, input: &ChaseInput) -> IVec2 {
    match id {
        GhostId::Red => input.pac_tile,
        GhostId::Pink => tiles_ahead(input.pac_tile, input.pac_dir, 4),
        GhostId::Cyan => tiles_ahead(input.pac_tile, input.pac_dir, 2) * 2 - input.red_tile,
        GhostId::Orange => {
            if input.ghost_tile.as_vec2().distance(input.pac_tile.as_vec2()) >= 8.0 {
                input.pac_tile
            } else {
                input.scatter_tile
            }
        }
    }
}
