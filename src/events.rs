//! Outbound notifications published by the game model.

use std::fmt;

use glam::IVec2;
use strum_macros::IntoStaticStr;
use tracing::trace;

use crate::entity::ghost::GhostId;

#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum GameEvent {
    GameStarted,
    LevelCreated { number: u32 },
    LevelStarted { number: u32 },
    HuntingPhaseStarted { phase: usize, scatter: bool },
    PacFoundFood { tile: IVec2, energizer: bool },
    PacGetsPower { ticks: u32 },
    PacStartsLosingPower,
    PacLostPower,
    PacDied,
    GhostReleased { ghost: GhostId },
    GhostEaten { ghost: GhostId, points: u32 },
    GhostEntersHouse { ghost: GhostId },
    BonusActivated { symbol: u8, tile: IVec2 },
    BonusEaten { symbol: u8, points: u32 },
    BonusExpired { symbol: u8 },
    ExtraLifeWon { lives: u8 },
    LevelCompleted { number: u32 },
    IntermissionRequested { number: u8 },
    GameOver,
    StopAllSounds,
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Receives game events. Listeners only observe; they have no access to the model.
pub trait GameEventListener {
    fn on_game_event(&mut self, event: &GameEvent);
}

impl<F> GameEventListener for F
where
    F: FnMut(&GameEvent),
{
    fn on_game_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Fans events out to the registered listeners in registration order.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn GameEventListener>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus").field("listeners", &self.listeners.len()).finish()
    }
}

impl EventBus {
    pub fn subscribe(&mut self, listener: Box<dyn GameEventListener>) {
        self.listeners.push(listener);
    }

    pub fn publish(&mut self, event: GameEvent) {
        trace!(event = event.name(), ?event, "Publishing game event");
        for listener in self.listeners.iter_mut() {
            listener.on_game_event(&event);
        }
    }
}
