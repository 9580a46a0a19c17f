//! This module contains all the constants used by the simulation.

use glam::UVec2;

/// The logical frame rate of the original hardware.
pub const TICKS_PER_SECOND: u32 = 60;

/// The size of each tile, in pixels.
pub const TILE_SIZE: f32 = 8.0;
/// The size of the arcade screen, in tiles. Built-in maps span the whole screen.
pub const ARCADE_TILES: UVec2 = UVec2::new(28, 36);

/// Distance covered per tick at 100% speed, in pixels.
pub const BASE_SPEED: f32 = 1.25;

/// Number of hunting phases (scatter/chase alternating).
pub const NUM_HUNTING_PHASES: usize = 8;

/// Sentinel duration of a hunting phase that never expires.
pub const INDEFINITE: u32 = u32::MAX;

pub const INITIAL_LIVES: u8 = 3;

/// Scoring constants shared by all variants.
pub mod score {
    pub const PELLET: u32 = 10;
    pub const ENERGIZER: u32 = 50;
    /// Kill value multipliers, in hundreds, indexed by the number of earlier victims.
    pub const GHOST_KILL_MULTIPLIERS: [u32; 4] = [2, 4, 8, 16];
    /// Awarded once per level when the 16th ghost of the level is eaten.
    pub const ALL_GHOSTS_KILLED_BONUS: u32 = 12_000;
    pub const EXTRA_LIFE: u32 = 10_000;
}

/// Durations, in ticks, of the non-hunting phases of a level.
pub mod ticks {
    pub const READY: u32 = 120;
    pub const READY_DEMO: u32 = 60;
    pub const GHOST_DYING: u32 = 60;
    pub const PAC_DYING: u32 = 180;
    pub const LEVEL_COMPLETE: u32 = 120;
    pub const GAME_OVER: u32 = 90;
    pub const RESTING_AFTER_PELLET: u8 = 1;
    pub const RESTING_AFTER_ENERGIZER: u8 = 3;
    /// How long an eaten bonus keeps showing its value.
    pub const BONUS_EATEN: u32 = 120;
    /// How long before the power runs out the "losing power" warning is published.
    pub const POWER_FADING: u32 = 120;
}

/// Speed multipliers not covered by the level table.
pub mod speed {
    pub const INSIDE_HOUSE: f32 = 0.5;
    pub const RETURNING_HOME: f32 = 2.0;
}
