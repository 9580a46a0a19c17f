//! A single level: the maze with its remaining food and the actors playing on it.

use std::sync::Arc;

use glam::IVec2;
use rand::rngs::SmallRng;
use smallvec::SmallVec;
use tracing::debug;

use crate::constants::{speed, BASE_SPEED, NUM_HUNTING_PHASES};
use crate::entity::bonus::Bonus;
use crate::entity::ghost::{ChaseInput, CruiseElroy, Ghost, GhostId, GhostState, Steering};
use crate::entity::pac::Pac;
use crate::game::hunting_timer::HuntingTimer;
use crate::game::level_data::LevelData;
use crate::map::{Food, WorldMap};
use crate::variant::RuleSet;

/// Banner shown over the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelMessage {
    Ready,
    GameOver,
}

pub struct GameLevel {
    number: u32,
    demo: bool,
    map: Arc<WorldMap>,
    data: LevelData,
    pub pac: Pac,
    ghosts: [Ghost; 4],
    eaten: Vec<bool>,
    food_eaten: usize,
    food_total: usize,
    bonus: Option<Bonus>,
    bonus_symbols: [u8; 2],
    bonuses_activated: usize,
    victims: SmallVec<[GhostId; 4]>,
    ghosts_killed: u32,
    hunting_timer: HuntingTimer,
    elroy: CruiseElroy,
    cut_scene: Option<u8>,
    pub message: Option<LevelMessage>,
}

impl GameLevel {
    pub fn new(number: u32, demo: bool, map: Arc<WorldMap>, rules: &dyn RuleSet, rng: &mut SmallRng) -> Self {
        let data = rules.level_data(number);
        let pac = Pac::new(&map);
        let ghosts = GhostId::ALL.map(|id| Ghost::new(id, &map));
        let food_total = map.total_food();
        let size = map.size();
        let bonus_symbols = [rules.bonus_symbol(number, 0, rng), rules.bonus_symbol(number, 1, rng)];
        let hunting_timer = HuntingTimer::new(hunting_durations(rules, number));

        debug!(number, demo, map = map.name(), food_total, ?bonus_symbols, "Level created");
        Self {
            number,
            demo,
            data,
            pac,
            ghosts,
            eaten: vec![false; (size.x * size.y) as usize],
            food_eaten: 0,
            food_total,
            bonus: None,
            bonus_symbols,
            bonuses_activated: 0,
            victims: SmallVec::new(),
            ghosts_killed: 0,
            hunting_timer,
            elroy: CruiseElroy::default(),
            cut_scene: rules.intermission(number),
            message: None,
            map,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    pub fn map(&self) -> &Arc<WorldMap> {
        &self.map
    }

    pub fn data(&self) -> &LevelData {
        &self.data
    }

    pub fn ghost(&self, id: GhostId) -> &Ghost {
        &self.ghosts[id.index()]
    }

    pub fn ghost_mut(&mut self, id: GhostId) -> &mut Ghost {
        &mut self.ghosts[id.index()]
    }

    pub fn ghosts(&self) -> &[Ghost; 4] {
        &self.ghosts
    }

    pub fn ghosts_mut(&mut self) -> impl Iterator<Item = &mut Ghost> {
        self.ghosts.iter_mut()
    }

    /// Ghosts currently in one of the given states.
    pub fn ghosts_in<'a>(&'a self, states: &'a [GhostState]) -> impl Iterator<Item = &'a Ghost> + 'a {
        self.ghosts.iter().filter(move |ghost| states.contains(&ghost.state()))
    }

    pub fn has_food(&self, tile: IVec2) -> bool {
        self.map.contains(tile) && self.map.food(tile) != Food::None && !self.eaten[self.map.index(tile)]
    }

    pub fn has_energizer(&self, tile: IVec2) -> bool {
        self.has_food(tile) && self.map.food(tile) == Food::Energizer
    }

    /// Removes the food from a tile. Returns what was there.
    pub fn eat_food(&mut self, tile: IVec2) -> Food {
        if !self.has_food(tile) {
            return Food::None;
        }
        let index = self.map.index(tile);
        self.eaten[index] = true;
        self.food_eaten += 1;
        self.map.food(tile)
    }

    pub fn food_eaten(&self) -> usize {
        self.food_eaten
    }

    pub fn food_remaining(&self) -> usize {
        self.food_total - self.food_eaten
    }

    pub fn total_food(&self) -> usize {
        self.food_total
    }

    pub fn is_completed(&self) -> bool {
        self.food_remaining() == 0
    }

    pub fn bonus(&self) -> Option<&Bonus> {
        self.bonus.as_ref()
    }

    pub fn bonus_mut(&mut self) -> Option<&mut Bonus> {
        self.bonus.as_mut()
    }

    pub fn bonus_symbols(&self) -> [u8; 2] {
        self.bonus_symbols
    }

    /// Index of the next bonus to activate, `None` after both appeared.
    pub fn next_bonus_index(&self) -> Option<usize> {
        (self.bonuses_activated < self.bonus_symbols.len()).then_some(self.bonuses_activated)
    }

    pub fn set_bonus(&mut self, bonus: Bonus) {
        self.bonus = Some(bonus);
        self.bonuses_activated += 1;
    }

    pub fn victims(&self) -> &[GhostId] {
        &self.victims
    }

    pub fn add_victim(&mut self, id: GhostId) {
        self.victims.push(id);
        self.ghosts_killed += 1;
    }

    pub fn clear_victims(&mut self) {
        self.victims.clear();
    }

    pub fn ghosts_killed(&self) -> u32 {
        self.ghosts_killed
    }

    pub fn hunting_timer(&self) -> &HuntingTimer {
        &self.hunting_timer
    }

    pub fn hunting_timer_mut(&mut self) -> &mut HuntingTimer {
        &mut self.hunting_timer
    }

    pub fn elroy(&self) -> CruiseElroy {
        self.elroy
    }

    pub fn elroy_mut(&mut self) -> &mut CruiseElroy {
        &mut self.elroy
    }

    /// Re-evaluates cruise Elroy against the remaining food.
    pub fn update_elroy(&mut self) {
        let remaining = self.food_remaining();
        let (dots1, dots2) = (self.data.elroy1_dots_left as usize, self.data.elroy2_dots_left as usize);
        if self.elroy.update(remaining, dots1, dots2) {
            debug!(tier = self.elroy.tier(), remaining, "Cruise Elroy upgraded");
        }
    }

    pub fn cut_scene(&self) -> Option<u8> {
        self.cut_scene
    }

    /// Puts every actor back on its start position and rewinds the hunting timer, keeping the
    /// food eaten so far. Used when a level starts and after Pac lost a life.
    pub fn reset_actors(&mut self, rules: &dyn RuleSet) {
        self.pac.reset();
        for ghost in self.ghosts.iter_mut() {
            ghost.reset();
        }
        if let Some(bonus) = self.bonus.as_mut() {
            bonus.set_inactive();
        }
        self.victims.clear();
        self.hunting_timer.reset(hunting_durations(rules, self.number));
    }

    /// Pixels per tick for Pac at the current power state.
    pub fn pac_speed(&self) -> f32 {
        let percent = if self.pac.is_powered() {
            self.data.pac_powered_speed
        } else {
            self.data.pac_speed
        };
        BASE_SPEED * percent as f32 / 100.0
    }

    /// Pixels per tick for a ghost in its current state and location.
    pub fn ghost_speed(&self, id: GhostId) -> f32 {
        let ghost = self.ghost(id);
        let in_tunnel = self.map.is_tunnel(ghost.tile());
        let percent = match ghost.state() {
            GhostState::Locked | GhostState::LeavingHouse => return BASE_SPEED * speed::INSIDE_HOUSE,
            GhostState::ReturningHome | GhostState::EnteringHouse => return BASE_SPEED * speed::RETURNING_HOME,
            GhostState::Eaten => return 0.0,
            _ if in_tunnel => self.data.ghost_tunnel_speed,
            GhostState::Frightened => self.data.ghost_frightened_speed,
            GhostState::HuntingPac => match (id, self.elroy.effective_tier()) {
                (GhostId::Red, 1) => self.data.elroy1_speed,
                (GhostId::Red, 2) => self.data.elroy2_speed,
                _ => self.data.ghost_speed,
            },
        };
        BASE_SPEED * percent as f32 / 100.0
    }

    /// Inputs for the classic chase targets of a ghost.
    pub fn chase_input(&self, id: GhostId) -> ChaseInput {
        ChaseInput {
            pac_tile: self.pac.tile(),
            pac_dir: self.pac.move_dir(),
            red_tile: self.ghost(GhostId::Red).tile(),
            ghost_tile: self.ghost(id).tile(),
            scatter_tile: self.map.scatter_tile(id),
        }
    }

    /// How a ghost walking the maze picks its next direction.
    pub fn ghost_steering(&self, id: GhostId, rules: &dyn RuleSet) -> Steering {
        match self.ghost(id).state() {
            GhostState::Frightened => Steering::Random,
            GhostState::ReturningHome => Steering::Target(self.map.ghost_start_tile(GhostId::Red)),
            _ => rules.hunting_steering(self, id),
        }
    }
}

/// The phase durations a rule set prescribes for a level.
pub fn hunting_durations(rules: &dyn RuleSet, level: u32) -> [u32; NUM_HUNTING_PHASES] {
    std::array::from_fn(|phase| rules.hunting_ticks(level, phase))
}
