//! Steering for demo levels and autopiloted play: head for the nearest food, avoiding
//! dangerous ghosts.

use glam::IVec2;
use pathfinding::prelude::bfs;

use crate::map::direction::Direction;
use crate::map::{TraversalFlags, WorldMap};

/// Calculates the first step of the shortest path from `from` to the closest tile with food.
///
/// Tiles in `danger` are treated as walls. Returns `None` if no food is reachable.
pub fn next_direction(
    map: &WorldMap,
    from: IVec2,
    has_food: impl Fn(IVec2) -> bool,
    danger: &[IVec2],
) -> Option<Direction> {
    let path = bfs(
        &from,
        |&tile| {
            Direction::DIRECTIONS
                .iter()
                .map(|dir| map.wrap(tile + dir.as_ivec2()))
                .filter(|next| map.can_enter(*next, TraversalFlags::PAC) && !danger.contains(next))
                .collect::<Vec<_>>()
        },
        |&tile| tile != from && has_food(tile),
    )?;

    let next = *path.get(1)?;
    Direction::DIRECTIONS
        .into_iter()
        .find(|dir| map.wrap(from + dir.as_ivec2()) == next)
}
