#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use glam::IVec2;
use pacman_arcade::events::GameEvent;
use pacman_arcade::game::level::GameLevel;
use pacman_arcade::game::GameModel;
use pacman_arcade::map::parser::MapTileParser;
use pacman_arcade::map::selector::MapSelector;
use pacman_arcade::map::{Food, WorldMap};
use pacman_arcade::persistence::{CoinMechanism, MemoryHighScoreStore};
use pacman_arcade::variant::{GameVariant, PacManRules, RuleSet};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// A tiny maze: Pac walks a dead-end corridor with one pellet, one energizer and one more
/// pellet, while the ghosts live in a separate corridor above their house.
pub const ARENA: &str = "\
@pos_pac 1,1
@pos_ghost_1_red 3,3
@pos_ghost_2_pink 3,5
@pos_ghost_3_cyan 2,5
@pos_ghost_4_orange 4,5
@pos_scatter_red_ghost 7,2
@pos_scatter_pink_ghost 0,2
@pos_scatter_cyan_ghost 7,6
@pos_scatter_orange_ghost 0,6
@pos_house_min_tile 1,4
@pos_house_max_tile 6,6
@pos_bonus 6,1
########
#  .o. #
########
#      #
###==###
#      #
########
";

pub fn arena_map() -> WorldMap {
    MapTileParser::parse_world("arena", ARENA).unwrap()
}

/// A Pac-Man game on the arena maze.
pub fn arena_game() -> GameModel {
    GameModel::new(
        Box::new(PacManRules),
        MapSelector::from_maps(vec![arena_map()]),
        SmallRng::seed_from_u64(1),
        Box::new(CoinMechanism::new(1)),
        Box::new(MemoryHighScoreStore::default()),
    )
}

pub fn game(variant: GameVariant) -> GameModel {
    GameModel::with_builtin_maps(variant, 42).unwrap()
}

/// A started game whose first level is showing READY.
pub fn started_game(variant: GameVariant) -> GameModel {
    let mut game = game(variant);
    game.start_new_game().unwrap();
    game.start_level();
    game
}

pub fn builtin_map(variant: GameVariant, number: usize) -> Arc<WorldMap> {
    MapSelector::builtin(variant).unwrap().select(number).unwrap()
}

/// A level built outside a game model.
pub fn level(rules: &dyn RuleSet, number: u32) -> GameLevel {
    let map = builtin_map(rules.variant(), rules.map_number(number));
    let mut rng = SmallRng::seed_from_u64(3);
    GameLevel::new(number, false, map, rules, &mut rng)
}

/// Records every event the game publishes.
pub fn record_events(game: &mut GameModel) -> Rc<RefCell<Vec<GameEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    game.subscribe(Box::new(move |event: &GameEvent| sink.borrow_mut().push(event.clone())));
    events
}

/// Ticks until `done` holds, at most `max_ticks` times. Returns whether it held.
pub fn tick_until(game: &mut GameModel, max_ticks: u32, done: impl Fn(&GameModel) -> bool) -> bool {
    for _ in 0..max_ticks {
        if done(game) {
            return true;
        }
        game.tick();
    }
    done(game)
}

/// Food tiles of the current level, pellets first, energizers last.
pub fn food_tiles(game: &GameModel) -> Vec<IVec2> {
    let map = game.level().unwrap().map();
    let mut tiles: Vec<IVec2> = map.food_tiles().collect();
    tiles.sort_by_key(|tile| map.food(*tile) == Food::Energizer);
    tiles
}

pub fn energizer_tiles(game: &GameModel) -> Vec<IVec2> {
    let map = game.level().unwrap().map();
    map.food_tiles().filter(|tile| map.food(*tile) == Food::Energizer).collect()
}
