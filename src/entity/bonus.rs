//! The bonus symbol that appears twice per level.

use glam::IVec2;

use crate::constants::ticks::BONUS_EATEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusState {
    Inactive,
    Edible { remaining: u32 },
    Eaten { remaining: u32 },
}

/// Outcome of a bonus tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusTick {
    Expired,
    Vanished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bonus {
    symbol: u8,
    points: u32,
    tile: IVec2,
    state: BonusState,
}

impl Bonus {
    pub fn new(symbol: u8, points: u32, tile: IVec2) -> Self {
        Self {
            symbol,
            points,
            tile,
            state: BonusState::Inactive,
        }
    }

    pub fn symbol(&self) -> u8 {
        self.symbol
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn tile(&self) -> IVec2 {
        self.tile
    }

    pub fn state(&self) -> BonusState {
        self.state
    }

    pub fn is_edible(&self) -> bool {
        matches!(self.state, BonusState::Edible { .. })
    }

    pub fn set_edible(&mut self, ticks: u32) {
        self.state = BonusState::Edible { remaining: ticks };
    }

    /// Marks the bonus eaten; it keeps showing its value for a while.
    pub fn set_eaten(&mut self) {
        self.state = BonusState::Eaten { remaining: BONUS_EATEN };
    }

    pub fn set_inactive(&mut self) {
        self.state = BonusState::Inactive;
    }

    pub fn tick(&mut self) -> Option<BonusTick> {
        match &mut self.state {
            BonusState::Inactive => None,
            BonusState::Edible { remaining } => {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    self.state = BonusState::Inactive;
                    Some(BonusTick::Expired)
                } else {
                    None
                }
            }
            BonusState::Eaten { remaining } => {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    self.state = BonusState::Inactive;
                    Some(BonusTick::Vanished)
                } else {
                    None
                }
            }
        }
    }
}
