//! Decides when the ghosts waiting in the house are released.
//!
//! Each locked ghost has a personal food counter that is used while the global counter is
//! disabled, which is the case at the start of every level. Once Pac loses a life the global
//! counter takes over until orange is released or the counter runs out. If Pac stops eating
//! for too long, the next ghost is released regardless of the counters.

use std::fmt;

use tracing::{debug, trace};

use crate::entity::ghost::{GhostId, GhostState};
use crate::game::level::GameLevel;

/// Global counter value at which pink and cyan leave the house.
const GLOBAL_LIMITS: [Option<u32>; 4] = [None, Some(7), Some(17), None];
/// Reaching this global count with orange still inside switches back to personal counters.
const GLOBAL_LIMIT_ORANGE: u32 = 32;

/// Invoked with the level and the ghost that has just been released.
pub type ReleaseCallback = Box<dyn FnMut(&mut GameLevel, GhostId)>;

/// Why a ghost was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseReason {
    Immediately,
    PersonalLimit,
    GlobalLimit,
    PacStarving,
}

#[derive(Default)]
pub struct GateKeeper {
    level_number: u32,
    global_counter: u32,
    global_enabled: bool,
    counters: [u32; 4],
    on_release: Option<ReleaseCallback>,
}

impl fmt::Debug for GateKeeper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateKeeper")
            .field("level_number", &self.level_number)
            .field("global_counter", &self.global_counter)
            .field("global_enabled", &self.global_enabled)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

impl GateKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_on_release(&mut self, callback: ReleaseCallback) {
        self.on_release = Some(callback);
    }

    /// Prepares the counters for a new level.
    pub fn init(&mut self, level_number: u32) {
        self.level_number = level_number;
        self.counters = [0; 4];
        self.global_counter = 0;
        self.global_enabled = false;
    }

    pub fn reset_counter_and_set_enabled(&mut self, enabled: bool) {
        self.global_counter = 0;
        self.global_enabled = enabled;
        trace!(enabled, "Global food counter reset");
    }

    pub fn is_global_enabled(&self) -> bool {
        self.global_enabled
    }

    pub fn global_counter(&self) -> u32 {
        self.global_counter
    }

    pub fn counter(&self, id: GhostId) -> u32 {
        self.counters[id.index()]
    }

    /// Food a ghost must see eaten before leaving, when counted on its own.
    pub fn personal_limit(&self, id: GhostId) -> u32 {
        let limits = match self.level_number {
            1 => [0, 0, 30, 60],
            2 => [0, 0, 0, 50],
            _ => [0, 0, 0, 0],
        };
        limits[id.index()]
    }

    /// Ticks without eating after which a ghost is released anyway.
    pub fn starving_limit(&self) -> u32 {
        if self.level_number < 5 {
            240
        } else {
            180
        }
    }

    /// Counts a pellet or energizer Pac has eaten.
    pub fn on_food_eaten(&mut self, level: &GameLevel) {
        if self.global_enabled {
            let orange_locked = level.ghost(GhostId::Orange).state() == GhostState::Locked;
            if orange_locked && self.global_counter == GLOBAL_LIMIT_ORANGE {
                debug!("Global food counter exhausted, back to personal counters");
                self.reset_counter_and_set_enabled(false);
            } else {
                self.global_counter += 1;
            }
        } else if let Some(id) = preferred_locked_ghost(level) {
            self.counters[id.index()] += 1;
        }
    }

    /// Releases at most one ghost. Returns the ghost that was released.
    pub fn unlock_ghost(&mut self, level: &mut GameLevel) -> Option<GhostId> {
        let (id, reason) = self.check_release(level)?;

        let ghost = level.ghost_mut(id);
        if id == GhostId::Red && ghost.is_outside_house() {
            ghost.set_state(GhostState::HuntingPac);
        } else {
            ghost.set_state(GhostState::LeavingHouse);
        }
        if reason == ReleaseReason::PacStarving {
            level.pac.end_starving();
        }
        debug!(ghost = id.nickname(), ?reason, "Ghost released");

        if let Some(callback) = self.on_release.as_mut() {
            callback(level, id);
        }
        Some(id)
    }

    fn check_release(&self, level: &GameLevel) -> Option<(GhostId, ReleaseReason)> {
        if level.ghost(GhostId::Red).state() == GhostState::Locked {
            return Some((GhostId::Red, ReleaseReason::Immediately));
        }
        let id = preferred_locked_ghost(level)?;
        if self.global_enabled {
            if GLOBAL_LIMITS[id.index()].is_some_and(|limit| self.global_counter >= limit) {
                return Some((id, ReleaseReason::GlobalLimit));
            }
        } else if self.counters[id.index()] >= self.personal_limit(id) {
            return Some((id, ReleaseReason::PersonalLimit));
        }
        if level.pac.starving_ticks() >= self.starving_limit() {
            return Some((id, ReleaseReason::PacStarving));
        }
        None
    }
}

/// The first of pink, cyan and orange still waiting in the house.
fn preferred_locked_ghost(level: &GameLevel) -> Option<GhostId> {
    [GhostId::Pink, GhostId::Cyan, GhostId::Orange]
        .into_iter()
        .find(|id| level.ghost(*id).state() == GhostState::Locked)
}
