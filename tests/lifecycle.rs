use pacman_arcade::entity::ghost::{GhostId, GhostState};
use pacman_arcade::entity::tile_center;
use pacman_arcade::events::GameEvent;
use pacman_arcade::game::level::LevelMessage;
use pacman_arcade::game::state::GamePhase;
use pacman_arcade::game::GameModel;
use pacman_arcade::map::selector::map_names;
use pacman_arcade::variant::{GameVariant, PacManRules, PacManXxlRules, RuleSet};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

fn hunting_game(variant: GameVariant) -> GameModel {
    let mut game = common::started_game(variant);
    common::tick_until(&mut game, 200, |game| game.phase() == GamePhase::Hunting);
    game
}

fn eat_pellets(game: &mut GameModel, count: usize) {
    for tile in common::food_tiles(game).into_iter().take(count) {
        game.on_pellet_eaten(tile);
    }
}

#[test]
fn test_new_game_shows_ready() {
    let mut game = common::game(GameVariant::PacMan);
    let events = common::record_events(&mut game);
    assert_that(&game.can_start_new_game()).is_true();
    assert_that(&game.phase()).is_equal_to(GamePhase::Idle);

    game.start_new_game().unwrap();
    game.start_level();

    assert_that(&game.lives()).is_equal_to(3);
    assert_that(&game.is_playing()).is_true();
    assert_that(&game.phase()).is_equal_to(GamePhase::Ready { remaining: 120 });
    assert_that(&game.level().unwrap().message).is_equal_to(Some(LevelMessage::Ready));
    assert_eq!(
        *events.borrow(),
        vec![
            GameEvent::LevelCreated { number: 1 },
            GameEvent::GameStarted,
            GameEvent::LevelStarted { number: 1 },
        ]
    );
}

#[test]
fn test_pac_death_restarts_level_keeping_food() {
    let mut game = hunting_game(GameVariant::PacMan);
    eat_pellets(&mut game, 5);
    game.on_ghost_killed(GhostId::Pink);

    game.on_pac_killed();
    assert_that(&game.lives()).is_equal_to(2);
    assert_that(&game.phase()).is_equal_to(GamePhase::PacDying { remaining: 180 });
    assert_that(&game.gate_keeper().is_global_enabled()).is_true();
    assert_that(&game.level().unwrap().pac.is_dead()).is_true();

    for _ in 0..180 {
        game.tick();
    }
    assert_that(&game.phase()).is_equal_to(GamePhase::Ready { remaining: 120 });

    let level = game.level().unwrap();
    assert_that(&level.food_eaten()).is_equal_to(5);
    assert_that(&level.victims().is_empty()).is_true();
    assert_that(&level.pac.is_dead()).is_false();
    assert_that(&level.pac.position()).is_equal_to(glam::Vec2::new(112.0, 212.0));
    assert_that(&level.hunting_timer().phase_index()).is_equal_to(0);
    assert_that(&level.hunting_timer().is_running()).is_false();
    for ghost in level.ghosts() {
        assert_that(&ghost.state()).is_equal_to(GhostState::Locked);
        assert_that(&ghost.position()).is_equal_to(ghost.start_position());
    }
}

#[test]
fn test_game_over_after_last_life() {
    let mut game = common::game(GameVariant::MsPacMan);
    game.set_initial_lives(1);
    let events = common::record_events(&mut game);
    game.start_new_game().unwrap();
    game.start_level();
    common::tick_until(&mut game, 200, |game| game.phase() == GamePhase::Hunting);

    game.on_pac_killed();
    assert_that(&game.is_over()).is_true();
    for _ in 0..180 {
        game.tick();
    }
    assert_that(&game.phase()).is_equal_to(GamePhase::GameOver { remaining: 90 });
    assert_that(&game.level().unwrap().message).is_equal_to(Some(LevelMessage::GameOver));

    for _ in 0..90 {
        game.tick();
    }
    assert_that(&game.phase()).is_equal_to(GamePhase::Idle);
    assert_that(&game.is_playing()).is_false();
    assert_that(&game.coins().num_coins()).is_equal_to(0);
    assert_that(&game.can_start_new_game()).is_false();
    assert_that(&events.borrow().contains(&GameEvent::GameOver)).is_true();
    assert_that(&events.borrow().last()).is_equal_to(Some(&GameEvent::StopAllSounds));
}

#[test]
fn test_cleared_level_leads_to_next() {
    let mut game = hunting_game(GameVariant::PacMan);
    let events = common::record_events(&mut game);
    let total = game.level().unwrap().total_food();
    eat_pellets(&mut game, total);

    assert_that(&game.level().unwrap().is_completed()).is_true();
    assert_that(&game.phase()).is_equal_to(GamePhase::LevelComplete { remaining: 120 });
    assert_that(&events.borrow().contains(&GameEvent::LevelCompleted { number: 1 })).is_true();

    for _ in 0..120 {
        game.tick();
    }
    let level = game.level().unwrap();
    assert_that(&level.number()).is_equal_to(2);
    assert_that(&level.food_eaten()).is_equal_to(0);
    assert_that(&level.elroy().tier()).is_equal_to(0);
    assert_that(&level.hunting_timer().is_running()).is_false();
    assert_that(&game.phase()).is_equal_to(GamePhase::Ready { remaining: 120 });
    assert_that(&game.gate_keeper().is_global_enabled()).is_false();
    assert_that(&game.gate_keeper().counter(GhostId::Cyan)).is_equal_to(0);
    // No intermission follows the first level.
    assert_that(&events.borrow().iter().any(|event| event.name() == "IntermissionRequested")).is_false();
}

#[test]
fn test_intermissions() {
    let scenes: Vec<Option<u8>> = (1..=5).map(|level| PacManRules.intermission(level)).collect();
    assert_eq!(scenes, vec![None, Some(1), None, None, Some(2)]);
    for level in 1..=21 {
        assert_that(&PacManXxlRules.intermission(level)).is_none();
    }
}

#[test]
fn test_xxl_rotates_mazes() {
    let mut game = hunting_game(GameVariant::PacManXxl);
    assert_that(&game.level().unwrap().map().name()).is_equal_to("pacman");
    game.start_next_level().unwrap();
    assert_that(&game.level().unwrap().map().name()).is_equal_to("ms_pacman_1");
}

#[test]
fn test_cruise_elroy_tiers() {
    let mut game = hunting_game(GameVariant::PacMan);
    let total = game.level().unwrap().total_food();

    eat_pellets(&mut game, total - 21);
    assert_that(&game.level().unwrap().elroy().tier()).is_equal_to(0);

    let tiles = common::food_tiles(&game);
    game.on_pellet_eaten(tiles[total - 21]);
    assert_that(&game.level().unwrap().food_remaining()).is_equal_to(20);
    assert_that(&game.level().unwrap().elroy().tier()).is_equal_to(1);

    for tile in &tiles[total - 20..total - 10] {
        game.on_pellet_eaten(*tile);
    }
    let elroy = game.level().unwrap().elroy();
    assert_that(&elroy.tier()).is_equal_to(2);
    assert_that(&elroy.is_active()).is_true();
}

#[test]
fn test_cruise_elroy_suspended_until_orange_leaves() {
    let mut game = hunting_game(GameVariant::PacMan);
    let total = game.level().unwrap().total_food();
    eat_pellets(&mut game, total - 10);
    assert_that(&game.level().unwrap().elroy().tier()).is_equal_to(2);

    game.on_pac_killed();
    let elroy = game.level().unwrap().elroy();
    assert_that(&elroy.is_suspended()).is_true();
    assert_that(&elroy.effective_tier()).is_equal_to(0);
    assert_that(&elroy.tier()).is_equal_to(2);

    common::tick_until(&mut game, 400, |game| game.phase() == GamePhase::Hunting);
    let level = game.level_mut().unwrap();
    for id in [GhostId::Red, GhostId::Pink, GhostId::Cyan] {
        level.ghost_mut(id).set_state(GhostState::HuntingPac);
    }
    for _ in 0..240 {
        level.pac.starve();
    }
    game.tick();

    let level = game.level().unwrap();
    assert_that(&level.ghost(GhostId::Orange).state()).is_equal_to(GhostState::LeavingHouse);
    assert_that(&level.elroy().is_suspended()).is_false();
    assert_that(&level.elroy().effective_tier()).is_equal_to(2);
}

#[test]
fn test_energizer_frightens_ghosts() {
    let mut game = hunting_game(GameVariant::PacMan);
    let events = common::record_events(&mut game);
    game.tick();
    let energizer = common::energizer_tiles(&game)[0];

    game.on_energizer_eaten(energizer);

    let level = game.level().unwrap();
    assert_that(&level.ghost(GhostId::Red).state()).is_equal_to(GhostState::Frightened);
    assert_that(&level.ghost(GhostId::Red).is_reverse_pending()).is_true();
    assert_that(&level.ghost(GhostId::Orange).state()).is_equal_to(GhostState::Locked);
    assert_that(&level.pac.power_ticks()).is_equal_to(360);
    assert_that(&level.hunting_timer().is_running()).is_false();
    assert_that(&events.borrow().contains(&GameEvent::PacGetsPower { ticks: 360 })).is_true();
}

#[test]
fn test_energizer_without_power_on_late_level() {
    let mut game = common::game(GameVariant::PacMan);
    game.start_new_game().unwrap();
    game.build_normal_level(17).unwrap();
    game.start_level();
    let events = common::record_events(&mut game);
    common::tick_until(&mut game, 200, |game| game.phase() == GamePhase::Hunting);
    game.tick();
    let energizer = common::energizer_tiles(&game)[0];

    game.on_energizer_eaten(energizer);

    let level = game.level().unwrap();
    assert_that(&level.ghost(GhostId::Red).state()).is_equal_to(GhostState::HuntingPac);
    assert_that(&level.ghost(GhostId::Red).is_reverse_pending()).is_true();
    assert_that(&level.pac.is_powered()).is_false();
    assert_that(&level.hunting_timer().is_running()).is_true();
    assert_that(&events.borrow().iter().any(|event| event.name() == "PacGetsPower")).is_false();
    assert_that(&game.score().score()).is_equal_to(50);
}

#[test]
fn test_power_runs_out() {
    let mut game = hunting_game(GameVariant::PacMan);
    game.tick();
    let energizer = common::energizer_tiles(&game)[0];
    game.on_energizer_eaten(energizer);
    let events = common::record_events(&mut game);

    game.level_mut().unwrap().pac.set_power(121);
    game.tick();
    assert_that(&events.borrow().contains(&GameEvent::PacStartsLosingPower)).is_true();

    game.level_mut().unwrap().pac.set_power(1);
    game.tick();
    let level = game.level().unwrap();
    assert_that(&events.borrow().contains(&GameEvent::PacLostPower)).is_true();
    assert_that(&level.ghost(GhostId::Red).state()).is_equal_to(GhostState::HuntingPac);
    assert_that(&level.hunting_timer().is_running()).is_true();
}

#[test]
fn test_demo_runs_on_autopilot() {
    let mut game = common::game(GameVariant::MsPacMan);
    game.build_demo_level().unwrap();
    game.start_level();
    assert_that(&game.phase()).is_equal_to(GamePhase::Ready { remaining: 60 });
    assert_that(&game.level().unwrap().pac.autopilot).is_true();

    for _ in 0..1500 {
        game.tick();
    }
    assert_that(&game.score().score()).is_equal_to(0);
    assert_that(&game.coins().num_coins()).is_equal_to(1);
    if let Some(level) = game.level() {
        assert_that(&level.is_demo()).is_true();
        assert_that(&(level.food_eaten() > 0)).is_true();
    }
}

#[test]
fn test_eaten_ghost_returns_home_on_every_maze() {
    let mazes = map_names(GameVariant::PacManXxl);
    for (index, name) in mazes.iter().enumerate() {
        let mut game = common::game(GameVariant::PacManXxl);
        game.start_new_game().unwrap();
        game.build_normal_level(index as u32 + 1).unwrap();
        game.start_level();
        let events = common::record_events(&mut game);
        common::tick_until(&mut game, 200, |game| game.phase() == GamePhase::Hunting);
        assert_that(&game.level().unwrap().map().name()).is_equal_to(*name);

        // Kill red far below the house so the eyes have to find their way back.
        let level = game.level_mut().unwrap();
        let far_away = tile_center(level.map().pac_start_tile());
        level.ghost_mut(GhostId::Red).motion.position = far_away;
        game.on_ghost_killed(GhostId::Red);

        let mut reached = Vec::new();
        for _ in 0..2000 {
            // Keep the other ghosts harmless so Pac survives the whole trip.
            for id in [GhostId::Pink, GhostId::Cyan, GhostId::Orange] {
                let ghost = game.level_mut().unwrap().ghost_mut(id);
                if ghost.state() == GhostState::HuntingPac {
                    ghost.set_state(GhostState::Frightened);
                }
            }
            game.tick();
            let state = game.level().unwrap().ghost(GhostId::Red).state();
            if reached.last() != Some(&state) {
                reached.push(state);
            }
            if state == GhostState::LeavingHouse {
                break;
            }
        }

        assert_eq!(
            reached,
            vec![
                GhostState::Eaten,
                GhostState::ReturningHome,
                GhostState::EnteringHouse,
                GhostState::LeavingHouse,
            ],
            "maze {name}"
        );
        assert_that(&events.borrow().contains(&GameEvent::GhostEntersHouse { ghost: GhostId::Red })).is_true();
    }
}

#[test]
fn test_hunting_ghost_catches_pac() {
    let mut game = hunting_game(GameVariant::PacMan);
    let events = common::record_events(&mut game);

    let level = game.level_mut().unwrap();
    let center = tile_center(level.pac.tile());
    level.pac.motion.position = center;
    let red = level.ghost_mut(GhostId::Red);
    red.set_state(GhostState::HuntingPac);
    red.motion.position = center;
    game.tick();

    assert_that(&events.borrow().contains(&GameEvent::PacDied)).is_true();
    assert_that(&game.phase()).is_equal_to(GamePhase::PacDying { remaining: 180 });
    assert_that(&game.lives()).is_equal_to(2);
    assert_that(&game.level().unwrap().pac.is_dead()).is_true();
}
