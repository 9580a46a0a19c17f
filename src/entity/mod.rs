//! Actors and the tile-based motion they share.
//!
//! Positions are pixel coordinates of an actor's center. An actor is "on" the tile containing
//! its center and may only turn when passing that tile's center.

pub mod autopilot;
pub mod bonus;
pub mod ghost;
pub mod pac;

use glam::{IVec2, Vec2};

use crate::constants::TILE_SIZE;
use crate::map::direction::Direction;
use crate::map::{TraversalFlags, WorldMap};

/// Pixel center of a tile.
pub fn tile_center(tile: IVec2) -> Vec2 {
    tile.as_vec2() * TILE_SIZE + Vec2::splat(TILE_SIZE / 2.0)
}

/// Pixel position half a tile right of a tile's center, where actors start between two tiles.
pub fn half_tile_right_of(tile: IVec2) -> Vec2 {
    tile_center(tile) + Vec2::new(TILE_SIZE / 2.0, 0.0)
}

/// Outcome of one movement step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveResult {
    /// The step ended on a different tile than it started on.
    pub new_tile_entered: bool,
    /// The actor is standing at a tile center facing a blocked tile.
    pub blocked: bool,
    /// The actor passed through a portal.
    pub teleported: bool,
}

/// Position and direction state shared by all actors.
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    pub position: Vec2,
    pub move_dir: Direction,
    pub wish_dir: Direction,
}

impl Motion {
    pub fn new(position: Vec2, dir: Direction) -> Self {
        Self {
            position,
            move_dir: dir,
            wish_dir: dir,
        }
    }

    pub fn tile(&self) -> IVec2 {
        (self.position / TILE_SIZE).floor().as_ivec2()
    }

    /// Offset of the position from the center of the current tile.
    pub fn offset(&self) -> Vec2 {
        self.position - tile_center(self.tile())
    }

    pub fn center_on_tile(&mut self) {
        self.position = tile_center(self.tile());
    }

    /// Reverses the current direction immediately.
    pub fn reverse(&mut self) {
        self.move_dir = self.move_dir.opposite();
        self.wish_dir = self.move_dir;
    }

    /// Moves along the maze by `speed` pixels, turning into `wish_dir` when passing a tile
    /// center and stopping in front of tiles that `flags` may not enter.
    pub fn move_through_maze(&mut self, map: &WorldMap, speed: f32, flags: TraversalFlags) -> MoveResult {
        self.move_with(map, speed, |tile| map.can_enter(tile, flags))
    }

    /// Same as [`Motion::move_through_maze`] with a custom accessibility predicate.
    pub fn move_with(&mut self, map: &WorldMap, speed: f32, can_enter: impl Fn(IVec2) -> bool) -> MoveResult {
        let mut result = MoveResult::default();
        let start_tile = self.tile();

        if self.wish_dir == self.move_dir.opposite() {
            self.move_dir = self.wish_dir;
        }

        let mut remaining = speed;
        let to_center = -self.offset().dot(self.move_dir.as_vec2());
        if (0.0..=remaining).contains(&to_center) {
            let turning = self.wish_dir != self.move_dir && can_enter(start_tile + self.wish_dir.as_ivec2());
            if turning {
                self.center_on_tile();
                remaining -= to_center;
                self.move_dir = self.wish_dir;
            } else if !can_enter(start_tile + self.move_dir.as_ivec2()) {
                self.center_on_tile();
                result.blocked = true;
                return result;
            }
        }

        self.position += self.move_dir.as_vec2() * remaining;

        let width = map.size().x as f32 * TILE_SIZE;
        if self.position.x < 0.0 && map.is_portal_row(self.tile().y) {
            self.position.x += width;
            result.teleported = true;
        } else if self.position.x >= width && map.is_portal_row(self.tile().y) {
            self.position.x -= width;
            result.teleported = true;
        }

        result.new_tile_entered = self.tile() != start_tile;
        result
    }

    /// Moves straight towards a pixel target without regard to terrain, used inside the house.
    /// Returns `true` once the target is reached.
    pub fn move_towards(&mut self, target: Vec2, speed: f32) -> bool {
        let delta = target - self.position;
        if delta.x.abs() > f32::EPSILON {
            let step = delta.x.clamp(-speed, speed);
            self.position.x += step;
            self.move_dir = if step < 0.0 { Direction::Left } else { Direction::Right };
        } else if delta.y.abs() > f32::EPSILON {
            let step = delta.y.clamp(-speed, speed);
            self.position.y += step;
            self.move_dir = if step < 0.0 { Direction::Up } else { Direction::Down };
        }
        self.wish_dir = self.move_dir;
        let arrived = self.position.distance(target) <= f32::EPSILON;
        if arrived {
            self.position = target;
        }
        arrived
    }
}
