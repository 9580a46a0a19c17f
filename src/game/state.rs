//! The phases a game moves through, each with its own countdown.

use strum_macros::IntoStaticStr;

use crate::constants::ticks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoStaticStr)]
pub enum GamePhase {
    /// No game in progress.
    #[default]
    Idle,
    /// Actors shown in their start positions, nothing moves yet.
    Ready { remaining: u32 },
    Hunting,
    /// Frozen after a ghost was eaten; only the eyes keep moving.
    GhostDying { remaining: u32 },
    PacDying { remaining: u32 },
    LevelComplete { remaining: u32 },
    GameOver { remaining: u32 },
}

impl GamePhase {
    pub fn ready(demo: bool) -> Self {
        GamePhase::Ready {
            remaining: if demo { ticks::READY_DEMO } else { ticks::READY },
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Counts the phase's countdown down by one tick. Returns `true` once it reaches zero;
    /// phases without a countdown never finish on their own.
    pub fn tick(&mut self) -> bool {
        match self {
            GamePhase::Ready { remaining }
            | GamePhase::GhostDying { remaining }
            | GamePhase::PacDying { remaining }
            | GamePhase::LevelComplete { remaining }
            | GamePhase::GameOver { remaining } => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            GamePhase::Idle | GamePhase::Hunting => false,
        }
    }
}
