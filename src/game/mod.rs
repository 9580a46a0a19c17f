//! This module contains the main game model and its tick-driven lifecycle.

pub mod gate_keeper;
pub mod hunting_timer;
pub mod level;
pub mod level_data;
pub mod score;
pub mod state;

use std::sync::Arc;

use glam::IVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use tracing::{debug, error, info, trace};

use crate::constants::score::{ALL_GHOSTS_KILLED_BONUS, ENERGIZER, GHOST_KILL_MULTIPLIERS, PELLET};
use crate::constants::ticks::{GAME_OVER, GHOST_DYING, LEVEL_COMPLETE, PAC_DYING, RESTING_AFTER_ENERGIZER, RESTING_AFTER_PELLET};
use crate::constants::INITIAL_LIVES;
use crate::entity::autopilot;
use crate::entity::bonus::{Bonus, BonusTick};
use crate::entity::ghost::{GhostId, GhostState, GhostStep, GhostStepEvent};
use crate::entity::pac::PowerChange;
use crate::error::GameResult;
use crate::events::{EventBus, GameEvent, GameEventListener};
use crate::formatter;
use crate::map::direction::Direction;
use crate::map::selector::MapSelector;
use crate::map::Food;
use crate::persistence::{CoinMechanism, CoinStore, HighScoreStore, MemoryHighScoreStore};
use crate::variant::{GameVariant, RuleSet};

use self::gate_keeper::GateKeeper;
use self::level::{GameLevel, LevelMessage};
use self::score::ScoreManager;
use self::state::GamePhase;

/// Ghost states in which a ghost moves while the game is hunting.
const MOVING_STATES: [GhostState; 5] = [
    GhostState::LeavingHouse,
    GhostState::HuntingPac,
    GhostState::Frightened,
    GhostState::ReturningHome,
    GhostState::EnteringHouse,
];

/// Ghost states that keep moving while the game is frozen after a kill.
const EYES_STATES: [GhostState; 2] = [GhostState::ReturningHome, GhostState::EnteringHouse];

/// The game model: owns the current level and every subsystem, and advances them once per
/// tick.
///
/// All randomness is drawn from the single generator passed in, so two models built with the
/// same seed and fed the same input go through identical states.
pub struct GameModel {
    rules: Box<dyn RuleSet>,
    maps: MapSelector,
    rng: SmallRng,
    level: Option<GameLevel>,
    gate_keeper: GateKeeper,
    score: ScoreManager,
    events: EventBus,
    coins: Box<dyn CoinStore>,
    phase: GamePhase,
    lives: u8,
    initial_lives: u8,
    playing: bool,
    ticks: u64,
}

impl GameModel {
    pub fn new(
        rules: Box<dyn RuleSet>,
        maps: MapSelector,
        rng: SmallRng,
        coins: Box<dyn CoinStore>,
        high_scores: Box<dyn HighScoreStore>,
    ) -> Self {
        let mut gate_keeper = GateKeeper::new();
        gate_keeper.set_on_release(Box::new(|level: &mut GameLevel, id: GhostId| {
            if id == GhostId::Orange && level.elroy().is_suspended() {
                level.elroy_mut().resume();
                debug!(tier = level.elroy().tier(), "Cruise Elroy resumed");
            }
        }));

        info!(variant = %rules.variant(), maps = maps.len(), "Game model created");
        Self {
            rules,
            maps,
            rng,
            level: None,
            gate_keeper,
            score: ScoreManager::new(high_scores),
            events: EventBus::default(),
            coins,
            phase: GamePhase::Idle,
            lives: 0,
            initial_lives: INITIAL_LIVES,
            playing: false,
            ticks: 0,
        }
    }

    /// A model playing the built-in maps, with one coin and an in-memory high score.
    pub fn with_builtin_maps(variant: GameVariant, seed: u64) -> GameResult<Self> {
        Ok(Self::new(
            variant.rule_set(),
            MapSelector::builtin(variant)?,
            SmallRng::seed_from_u64(seed),
            Box::new(CoinMechanism::new(1)),
            Box::new(MemoryHighScoreStore::default()),
        ))
    }

    pub fn variant(&self) -> GameVariant {
        self.rules.variant()
    }

    pub fn rules(&self) -> &dyn RuleSet {
        self.rules.as_ref()
    }

    pub fn level(&self) -> Option<&GameLevel> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut GameLevel> {
        self.level.as_mut()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn set_initial_lives(&mut self, lives: u8) {
        self.initial_lives = lives;
    }

    pub fn score(&self) -> &ScoreManager {
        &self.score
    }

    pub fn gate_keeper(&self) -> &GateKeeper {
        &self.gate_keeper
    }

    pub fn coins(&self) -> &dyn CoinStore {
        self.coins.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Ticks simulated since the model was created.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn subscribe(&mut self, listener: Box<dyn GameEventListener>) {
        self.events.subscribe(listener);
    }

    pub fn is_over(&self) -> bool {
        self.lives == 0
    }

    pub fn can_start_new_game(&self) -> bool {
        !self.coins.is_empty()
    }

    /// Starts a new game on level 1. The level still has to be started with
    /// [`GameModel::start_level`].
    pub fn start_new_game(&mut self) -> GameResult<()> {
        self.playing = true;
        self.lives = self.initial_lives;
        self.score.reset();
        self.build_normal_level(1)?;
        info!(variant = %self.variant(), lives = self.lives, "New game started");
        self.events.publish(GameEvent::GameStarted);
        Ok(())
    }

    pub fn build_normal_level(&mut self, number: u32) -> GameResult<()> {
        self.build_level(number, false)
    }

    /// Builds the attract-mode level: level 1, Pac on autopilot, no points counted.
    pub fn build_demo_level(&mut self) -> GameResult<()> {
        self.build_level(1, true)?;
        if let Some(level) = self.level.as_mut() {
            level.pac.autopilot = true;
        }
        Ok(())
    }

    fn build_level(&mut self, number: u32, demo: bool) -> GameResult<()> {
        let map = self.maps.select(self.rules.map_number(number))?;
        let level = GameLevel::new(number, demo, map, self.rules.as_ref(), &mut self.rng);
        self.gate_keeper.init(number);
        self.level = Some(level);
        self.events.publish(GameEvent::LevelCreated { number });
        Ok(())
    }

    /// Puts the actors on their start positions and shows the READY banner.
    pub fn start_level(&mut self) {
        let Some(level) = self.level.as_mut() else {
            trace!("No level to start");
            return;
        };
        level.reset_actors(self.rules.as_ref());
        let demo = level.is_demo();
        let number = level.number();
        level.message = Some(if demo {
            LevelMessage::GameOver
        } else {
            LevelMessage::Ready
        });
        self.score.set_enabled(!demo);
        self.phase = GamePhase::ready(demo);
        info!(number, demo, "Level started");
        self.events.publish(GameEvent::LevelStarted { number });
    }

    pub fn start_next_level(&mut self) -> GameResult<()> {
        let next = self.level.as_ref().map_or(1, |level| level.number() + 1);
        self.build_normal_level(next)?;
        self.start_level();
        Ok(())
    }

    /// Ends the READY pause and lets the actors move.
    pub fn start_hunting(&mut self) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        level.message = None;
        level.hunting_timer_mut().start();
        let phase = level.hunting_timer().phase_index();
        let scatter = level.hunting_timer().is_scatter();
        self.phase = GamePhase::Hunting;
        self.events.publish(GameEvent::HuntingPhaseStarted { phase, scatter });
    }

    pub fn on_game_ending(&mut self) {
        self.playing = false;
        if !self.coins.is_empty() {
            self.coins.consume_coin();
        }
        self.score.save_high_score();
        info!(score = self.score.score(), coins = self.coins.num_coins(), "Game ended");
        self.events.publish(GameEvent::StopAllSounds);
    }

    /// Host input: the direction Pac should take next.
    pub fn steer(&mut self, dir: Direction) {
        if let Some(level) = self.level.as_mut() {
            level.pac.steer(dir);
        }
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) {
        formatter::increment_tick();
        self.ticks += 1;

        match self.phase {
            GamePhase::Idle => {}
            GamePhase::Ready { .. } => {
                if self.phase.tick() {
                    self.start_hunting();
                }
            }
            GamePhase::Hunting => self.update_hunting(),
            GamePhase::GhostDying { .. } => {
                self.move_ghosts(&EYES_STATES);
                if self.phase.tick() {
                    self.end_ghost_dying();
                }
            }
            GamePhase::PacDying { .. } => {
                if self.phase.tick() {
                    self.end_pac_dying();
                }
            }
            GamePhase::LevelComplete { .. } => {
                if self.phase.tick() {
                    self.end_level_complete();
                }
            }
            GamePhase::GameOver { .. } => {
                if self.phase.tick() {
                    if self.playing {
                        self.on_game_ending();
                    }
                    self.phase = GamePhase::Idle;
                }
            }
        }
    }

    fn update_hunting(&mut self) {
        let Some(level) = self.level.as_mut() else {
            return;
        };

        if let Some(phase) = level.hunting_timer_mut().tick() {
            for ghost in level.ghosts_mut() {
                if matches!(ghost.state(), GhostState::HuntingPac | GhostState::Locked | GhostState::LeavingHouse) {
                    ghost.request_reverse();
                }
            }
            let scatter = level.hunting_timer().is_scatter();
            self.events.publish(GameEvent::HuntingPhaseStarted { phase, scatter });
        }

        if let Some(ghost) = self.gate_keeper.unlock_ghost(level) {
            self.events.publish(GameEvent::GhostReleased { ghost });
        }

        self.move_pac();
        self.check_food();
        if self.phase != GamePhase::Hunting {
            return;
        }
        self.check_collisions();
        if self.phase != GamePhase::Hunting {
            return;
        }
        self.move_ghosts(&MOVING_STATES);
        self.check_collisions();
        if self.phase != GamePhase::Hunting {
            return;
        }
        self.update_power();
        self.update_bonus();
    }

    fn move_pac(&mut self) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        if level.pac.autopilot {
            let danger: SmallVec<[IVec2; 4]> = level
                .ghosts_in(&[GhostState::HuntingPac])
                .map(|ghost| ghost.tile())
                .collect();
            let steer = autopilot::next_direction(level.map(), level.pac.tile(), |tile| level.has_food(tile), &danger);
            if let Some(dir) = steer {
                level.pac.steer(dir);
            }
        }
        let speed = level.pac_speed();
        let map = Arc::clone(level.map());
        level.pac.step(&map, speed);
        level.pac.starve();
    }

    fn check_food(&mut self) {
        let Some(level) = self.level.as_ref() else {
            return;
        };
        let tile = level.pac.tile();
        if level.has_energizer(tile) {
            self.on_energizer_eaten(tile);
        } else if level.has_food(tile) {
            self.on_pellet_eaten(tile);
        }
    }

    fn check_collisions(&mut self) {
        let Some(level) = self.level.as_ref() else {
            return;
        };
        let pac_tile = level.pac.tile();
        let colliding: SmallVec<[(GhostId, GhostState); 4]> = level
            .ghosts()
            .iter()
            .filter(|ghost| ghost.tile() == pac_tile)
            .map(|ghost| (ghost.id(), ghost.state()))
            .collect();

        for (id, state) in colliding {
            match state {
                GhostState::Frightened => self.on_ghost_killed(id),
                GhostState::HuntingPac => {
                    self.on_pac_killed();
                    return;
                }
                _ => {}
            }
        }
    }

    fn move_ghosts(&mut self, states: &[GhostState]) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        let map = Arc::clone(level.map());
        for id in GhostId::ALL {
            if !states.contains(&level.ghost(id).state()) {
                continue;
            }
            let input = GhostStep {
                map: &map,
                speed: level.ghost_speed(id),
                steering: level.ghost_steering(id, self.rules.as_ref()),
                frightened_on_exit: level.pac.is_powered() && !level.victims().contains(&id),
            };
            match level.ghost_mut(id).step(&input, &mut self.rng) {
                Some(GhostStepEvent::EnteredHouse) => {
                    self.events.publish(GameEvent::GhostEntersHouse { ghost: id });
                }
                Some(event) => trace!(ghost = id.nickname(), ?event, "Ghost house event"),
                None => {}
            }
        }
    }

    fn update_power(&mut self) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        match level.pac.tick_power() {
            Some(PowerChange::StartsLosing) => self.events.publish(GameEvent::PacStartsLosingPower),
            Some(PowerChange::Lost) => {
                for ghost in level.ghosts_mut() {
                    if ghost.state() == GhostState::Frightened {
                        ghost.set_state(GhostState::HuntingPac);
                    }
                }
                level.hunting_timer_mut().start();
                debug!("Pac lost power");
                self.events.publish(GameEvent::PacLostPower);
            }
            None => {}
        }
    }

    fn update_bonus(&mut self) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        let number = level.number();
        let pac_tile = level.pac.tile();
        let Some(bonus) = level.bonus_mut() else {
            return;
        };

        if bonus.is_edible() && bonus.tile() == pac_tile {
            bonus.set_eaten();
            let (symbol, points) = (bonus.symbol(), bonus.points());
            debug!(symbol, points, "Bonus eaten");
            self.events.publish(GameEvent::BonusEaten { symbol, points });
            self.award_points(points, number);
            return;
        }

        match bonus.tick() {
            Some(BonusTick::Expired) => {
                let symbol = bonus.symbol();
                debug!(symbol, "Bonus expired");
                self.events.publish(GameEvent::BonusExpired { symbol });
            }
            Some(BonusTick::Vanished) => trace!(symbol = bonus.symbol(), "Bonus value hidden"),
            None => {}
        }
    }

    /// Adds points, granting an extra life for every threshold crossed.
    fn award_points(&mut self, points: u32, level_number: u32) {
        let change = self.score.add(points, level_number);
        for _ in 0..change.extra_lives {
            self.lives = self.lives.saturating_add(1);
            info!(lives = self.lives, "Extra life won");
            self.events.publish(GameEvent::ExtraLifeWon { lives: self.lives });
        }
    }

    pub fn on_pellet_eaten(&mut self, tile: IVec2) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        if level.eat_food(tile) == Food::None {
            trace!(?tile, "No food to eat");
            return;
        }
        level.pac.rest(RESTING_AFTER_PELLET);
        level.pac.end_starving();
        level.update_elroy();
        self.gate_keeper.on_food_eaten(level);
        let (food_eaten, number) = (level.food_eaten(), level.number());

        self.events.publish(GameEvent::PacFoundFood { tile, energizer: false });
        self.award_points(PELLET, number);
        self.after_food_eaten(food_eaten);
    }

    pub fn on_energizer_eaten(&mut self, tile: IVec2) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        if level.eat_food(tile) == Food::None {
            trace!(?tile, "No food to eat");
            return;
        }
        level.pac.rest(RESTING_AFTER_ENERGIZER);
        level.pac.end_starving();
        level.update_elroy();
        self.gate_keeper.on_food_eaten(level);
        level.clear_victims();

        for ghost in level.ghosts_mut() {
            if matches!(ghost.state(), GhostState::HuntingPac | GhostState::Frightened) {
                ghost.request_reverse();
            }
        }

        let power = level.data().power_ticks();
        if power > 0 {
            level.pac.set_power(power);
            level.hunting_timer_mut().stop();
            for ghost in level.ghosts_mut() {
                if ghost.state() == GhostState::HuntingPac {
                    ghost.set_state(GhostState::Frightened);
                }
            }
        }
        let (food_eaten, number) = (level.food_eaten(), level.number());

        self.events.publish(GameEvent::PacFoundFood { tile, energizer: true });
        if power > 0 {
            debug!(ticks = power, "Pac gets power");
            self.events.publish(GameEvent::PacGetsPower { ticks: power });
        }
        self.award_points(ENERGIZER, number);
        self.after_food_eaten(food_eaten);
    }

    fn after_food_eaten(&mut self, food_eaten: usize) {
        if self.rules.bonus_thresholds().contains(&food_eaten) {
            self.activate_next_bonus();
        }

        let Some(level) = self.level.as_mut() else {
            return;
        };
        if level.is_completed() {
            level.hunting_timer_mut().stop();
            level.pac.set_power(0);
            if let Some(bonus) = level.bonus_mut() {
                bonus.set_inactive();
            }
            let number = level.number();
            self.phase = GamePhase::LevelComplete { remaining: LEVEL_COMPLETE };
            info!(number, "Level completed");
            self.events.publish(GameEvent::LevelCompleted { number });
        }
    }

    /// Places the next bonus of the level, if any is left.
    pub fn activate_next_bonus(&mut self) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        let Some(index) = level.next_bonus_index() else {
            trace!("Both bonuses already activated");
            return;
        };
        let symbol = level.bonus_symbols()[index];
        let tile = level.map().bonus_tile();
        let mut bonus = Bonus::new(symbol, self.rules.bonus_points(symbol), tile);
        bonus.set_edible(self.rng.random_range(540..600));
        level.set_bonus(bonus);
        debug!(index, symbol, ?tile, "Bonus activated");
        self.events.publish(GameEvent::BonusActivated { symbol, tile });
    }

    pub fn on_ghost_killed(&mut self, id: GhostId) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        let index = level.victims().len().min(GHOST_KILL_MULTIPLIERS.len() - 1);
        let points = GHOST_KILL_MULTIPLIERS[index] * 100;
        level.add_victim(id);
        level.ghost_mut(id).set_state(GhostState::Eaten);
        let all_killed = level.ghosts_killed() == 16;
        let number = level.number();

        debug!(ghost = id.nickname(), points, "Ghost eaten");
        self.events.publish(GameEvent::GhostEaten { ghost: id, points });
        self.award_points(points, number);
        if all_killed {
            info!("All ghosts of the level eaten");
            self.award_points(ALL_GHOSTS_KILLED_BONUS, number);
        }
        self.phase = GamePhase::GhostDying { remaining: GHOST_DYING };
    }

    pub fn on_pac_killed(&mut self) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        level.hunting_timer_mut().stop();
        level.pac.die();
        level.elroy_mut().suspend();
        if let Some(bonus) = level.bonus_mut() {
            if bonus.is_edible() {
                bonus.set_inactive();
            }
        }
        let demo = level.is_demo();

        self.gate_keeper.reset_counter_and_set_enabled(true);
        if !demo {
            self.lives = self.lives.saturating_sub(1);
        }
        info!(lives = self.lives, "Pac died");
        self.events.publish(GameEvent::PacDied);
        self.phase = GamePhase::PacDying { remaining: PAC_DYING };
    }

    fn end_ghost_dying(&mut self) {
        if let Some(level) = self.level.as_mut() {
            for ghost in level.ghosts_mut() {
                if ghost.state() == GhostState::Eaten {
                    ghost.set_state(GhostState::ReturningHome);
                }
            }
        }
        self.phase = GamePhase::Hunting;
    }

    fn end_pac_dying(&mut self) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        if level.is_demo() || self.lives == 0 {
            level.message = Some(LevelMessage::GameOver);
            self.phase = GamePhase::GameOver { remaining: GAME_OVER };
            self.events.publish(GameEvent::GameOver);
            return;
        }
        level.reset_actors(self.rules.as_ref());
        level.message = Some(LevelMessage::Ready);
        self.phase = GamePhase::ready(false);
    }

    fn end_level_complete(&mut self) {
        let Some(level) = self.level.as_ref() else {
            return;
        };
        if level.is_demo() {
            self.phase = GamePhase::GameOver { remaining: GAME_OVER };
            self.events.publish(GameEvent::GameOver);
            return;
        }
        if let Some(number) = level.cut_scene() {
            self.events.publish(GameEvent::IntermissionRequested { number });
        }
        if let Err(error) = self.start_next_level() {
            error!(%error, "Next level could not be built");
            self.phase = GamePhase::GameOver { remaining: GAME_OVER };
            self.events.publish(GameEvent::GameOver);
        }
    }
}
