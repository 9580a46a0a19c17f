use glam::IVec2;
use pacman_arcade::entity::ghost::{chase_target, tiles_ahead, ChaseInput, Ghost, GhostId, GhostState, Steering};
use pacman_arcade::entity::tile_center;
use pacman_arcade::map::direction::Direction;
use pacman_arcade::map::parser::MapTileParser;
use pacman_arcade::map::WorldMap;
use pacman_arcade::variant::{MsPacManRules, PacManRules, PacManXxlRules};
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use speculoos::prelude::*;

mod common;

const CROSS: &str = "\
@oneway 3,3
#######
### ###
### ###
#     #
### ###
###=###
#######
";

fn cross() -> WorldMap {
    MapTileParser::parse_world("cross", CROSS).unwrap()
}

fn ghost_at(map: &WorldMap, tile: IVec2, dir: Direction) -> Ghost {
    let mut ghost = Ghost::new(GhostId::Pink, map);
    ghost.motion.position = tile_center(tile);
    ghost.motion.move_dir = dir;
    ghost.motion.wish_dir = dir;
    ghost
}

fn input(pac_tile: IVec2, pac_dir: Direction) -> ChaseInput {
    ChaseInput {
        pac_tile,
        pac_dir,
        red_tile: IVec2::new(12, 22),
        ghost_tile: IVec2::new(1, 1),
        scatter_tile: IVec2::new(0, 34),
    }
}

#[test]
fn test_red_targets_pac() {
    let pac = IVec2::new(10, 20);
    assert_eq!(chase_target(GhostId::Red, &input(pac, Direction::Left)), pac);
}

#[test]
fn test_pink_targets_four_ahead() {
    let pac = IVec2::new(10, 20);
    assert_eq!(chase_target(GhostId::Pink, &input(pac, Direction::Left)), IVec2::new(6, 20));
    assert_eq!(chase_target(GhostId::Pink, &input(pac, Direction::Right)), IVec2::new(14, 20));
    assert_eq!(chase_target(GhostId::Pink, &input(pac, Direction::Down)), IVec2::new(10, 24));
    // Facing up also shifts the target four tiles to the left.
    assert_eq!(chase_target(GhostId::Pink, &input(pac, Direction::Up)), IVec2::new(6, 16));
}

#[test]
fn test_cyan_mirrors_red() {
    let pac = IVec2::new(10, 20);
    assert_eq!(chase_target(GhostId::Cyan, &input(pac, Direction::Right)), IVec2::new(12, 18));

    let mut facing_up = input(pac, Direction::Up);
    facing_up.red_tile = IVec2::new(8, 20);
    assert_eq!(tiles_ahead(pac, Direction::Up, 2), IVec2::new(8, 18));
    assert_eq!(chase_target(GhostId::Cyan, &facing_up), IVec2::new(8, 16));
}

#[test]
fn test_orange_keeps_distance() {
    let pac = IVec2::new(10, 20);
    let mut far = input(pac, Direction::Left);
    far.ghost_tile = IVec2::new(10, 12);
    assert_eq!(chase_target(GhostId::Orange, &far), pac);

    let mut near = input(pac, Direction::Left);
    near.ghost_tile = IVec2::new(10, 13);
    assert_eq!(chase_target(GhostId::Orange, &near), near.scatter_tile);
}

#[test]
fn test_ties_prefer_up_over_right() {
    let map = cross();
    let ghost = ghost_at(&map, IVec2::new(3, 3), Direction::Right);
    assert_eq!(ghost.direction_towards(&map, IVec2::new(4, 2)), Direction::Up);
}

#[test]
fn test_hunting_ghost_cannot_turn_up_on_one_way_tile() {
    let map = cross();
    let mut ghost = ghost_at(&map, IVec2::new(3, 3), Direction::Right);
    ghost.set_state(GhostState::HuntingPac);
    assert_eq!(ghost.direction_towards(&map, IVec2::new(4, 2)), Direction::Right);

    ghost.set_state(GhostState::Frightened);
    assert_eq!(ghost.direction_towards(&map, IVec2::new(4, 2)), Direction::Up);
}

#[test]
fn test_dead_end_reverses() {
    let map = cross();
    let ghost = ghost_at(&map, IVec2::new(3, 1), Direction::Up);
    assert_eq!(ghost.direction_towards(&map, IVec2::new(3, 0)), Direction::Down);
}

#[test]
fn test_ghost_never_walks_through_door() {
    let map = cross();
    assert_that(&Ghost::can_enter(&map, IVec2::new(3, 4))).is_true();
    assert_that(&Ghost::can_enter(&map, IVec2::new(3, 5))).is_false();

    let ghost = ghost_at(&map, IVec2::new(3, 4), Direction::Down);
    assert_eq!(ghost.direction_towards(&map, IVec2::new(3, 6)), Direction::Up);
}

#[test]
fn test_random_direction_is_legal() {
    let map = cross();
    let ghost = ghost_at(&map, IVec2::new(3, 3), Direction::Right);
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..200 {
        let dir = ghost.random_direction(&map, &mut rng);
        assert_that(&[Direction::Up, Direction::Down, Direction::Right].contains(&dir)).is_true();
    }
}

#[test]
fn test_classic_steering_follows_phase() {
    let mut level = common::level(&PacManRules, 1);
    level.ghost_mut(GhostId::Red).set_state(GhostState::HuntingPac);
    let scatter = level.map().scatter_tile(GhostId::Red);
    assert_eq!(level.ghost_steering(GhostId::Red, &PacManRules), Steering::Target(scatter));

    // Cruise Elroy chases even during scatter phases.
    level.elroy_mut().update(10, 20, 10);
    assert_eq!(
        level.ghost_steering(GhostId::Red, &PacManRules),
        Steering::Target(level.pac.tile())
    );

    level.ghost_mut(GhostId::Red).set_state(GhostState::Frightened);
    assert_eq!(level.ghost_steering(GhostId::Red, &PacManRules), Steering::Random);
    level.ghost_mut(GhostId::Red).set_state(GhostState::ReturningHome);
    assert_eq!(
        level.ghost_steering(GhostId::Red, &PacManXxlRules),
        Steering::Target(level.map().ghost_start_tile(GhostId::Red))
    );
}

#[test]
fn test_ms_pacman_red_and_pink_roam_in_first_phase() {
    let mut level = common::level(&MsPacManRules, 1);
    for id in GhostId::ALL {
        level.ghost_mut(id).set_state(GhostState::HuntingPac);
    }
    assert_eq!(level.ghost_steering(GhostId::Red, &MsPacManRules), Steering::Random);
    assert_eq!(level.ghost_steering(GhostId::Pink, &MsPacManRules), Steering::Random);
    let cyan_scatter = level.map().scatter_tile(GhostId::Cyan);
    assert_eq!(level.ghost_steering(GhostId::Cyan, &MsPacManRules), Steering::Target(cyan_scatter));

    level.hunting_timer_mut().start();
    while level.hunting_timer_mut().tick().is_none() {}
    assert_that(&level.ghost_steering(GhostId::Red, &MsPacManRules)).is_equal_to(Steering::Target(level.pac.tile()));
}
