//! Pac: the player actor.

use glam::{IVec2, Vec2};

use crate::constants::ticks::POWER_FADING;
use crate::entity::{half_tile_right_of, Motion, MoveResult};
use crate::map::direction::Direction;
use crate::map::{TraversalFlags, WorldMap};

/// Change of Pac's power reported by [`Pac::tick_power`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerChange {
    StartsLosing,
    Lost,
}

#[derive(Debug, Clone)]
pub struct Pac {
    pub motion: Motion,
    start_position: Vec2,
    /// Remaining ticks of energizer power.
    power_ticks: u32,
    /// Ticks Pac stands still after eating.
    resting_ticks: u8,
    /// Ticks since Pac last ate something.
    starving_ticks: u32,
    pub autopilot: bool,
    dead: bool,
}

impl Pac {
    pub fn new(map: &WorldMap) -> Self {
        let start_position = half_tile_right_of(map.pac_start_tile());
        Self {
            motion: Motion::new(start_position, Direction::Left),
            start_position,
            power_ticks: 0,
            resting_ticks: 0,
            starving_ticks: 0,
            autopilot: false,
            dead: false,
        }
    }

    /// Back to the start position, alive and without power. Keeps the autopilot setting.
    pub fn reset(&mut self) {
        self.motion = Motion::new(self.start_position, Direction::Left);
        self.power_ticks = 0;
        self.resting_ticks = 0;
        self.starving_ticks = 0;
        self.dead = false;
    }

    pub fn tile(&self) -> IVec2 {
        self.motion.tile()
    }

    pub fn position(&self) -> Vec2 {
        self.motion.position
    }

    pub fn move_dir(&self) -> Direction {
        self.motion.move_dir
    }

    pub fn steer(&mut self, dir: Direction) {
        self.motion.wish_dir = dir;
    }

    pub fn is_powered(&self) -> bool {
        self.power_ticks > 0
    }

    pub fn power_ticks(&self) -> u32 {
        self.power_ticks
    }

    pub fn set_power(&mut self, ticks: u32) {
        self.power_ticks = ticks;
    }

    /// Counts power down by one tick.
    pub fn tick_power(&mut self) -> Option<PowerChange> {
        if self.power_ticks == 0 {
            return None;
        }
        self.power_ticks -= 1;
        match self.power_ticks {
            0 => Some(PowerChange::Lost),
            POWER_FADING => Some(PowerChange::StartsLosing),
            _ => None,
        }
    }

    pub fn resting_ticks(&self) -> u8 {
        self.resting_ticks
    }

    pub fn rest(&mut self, ticks: u8) {
        self.resting_ticks = ticks;
    }

    pub fn starving_ticks(&self) -> u32 {
        self.starving_ticks
    }

    pub fn starve(&mut self) {
        self.starving_ticks = self.starving_ticks.saturating_add(1);
    }

    pub fn end_starving(&mut self) {
        self.starving_ticks = 0;
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn die(&mut self) {
        self.dead = true;
        self.power_ticks = 0;
    }

    /// Moves Pac unless it is resting after a meal.
    pub fn step(&mut self, map: &WorldMap, speed: f32) -> MoveResult {
        if self.resting_ticks > 0 {
            self.resting_ticks -= 1;
            return MoveResult::default();
        }
        self.motion.move_through_maze(map, speed, TraversalFlags::PAC)
    }
}
