//! The scatter/chase phase timer.

use tracing::{debug, trace};

use crate::constants::{INDEFINITE, NUM_HUNTING_PHASES};

/// Cycles through the hunting phases. Even phase indices are scatter phases, odd ones chase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntingTimer {
    durations: [u32; NUM_HUNTING_PHASES],
    phase: usize,
    remaining: u32,
    running: bool,
}

impl HuntingTimer {
    pub fn new(durations: [u32; NUM_HUNTING_PHASES]) -> Self {
        Self {
            durations,
            phase: 0,
            remaining: durations[0],
            running: false,
        }
    }

    /// Loads new durations, goes back to the first phase and stops. Never reported as a
    /// phase change.
    pub fn reset(&mut self, durations: [u32; NUM_HUNTING_PHASES]) {
        self.durations = durations;
        self.phase = 0;
        self.remaining = durations[0];
        self.running = false;
        trace!("Hunting timer reset");
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase_index(&self) -> usize {
        self.phase
    }

    pub fn is_scatter(&self) -> bool {
        self.phase % 2 == 0
    }

    pub fn is_chase(&self) -> bool {
        !self.is_scatter()
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn durations(&self) -> &[u32; NUM_HUNTING_PHASES] {
        &self.durations
    }

    /// Advances one tick. Returns the new phase index when a phase ends.
    pub fn tick(&mut self) -> Option<usize> {
        if !self.running || self.remaining == INDEFINITE {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }
        self.phase = (self.phase + 1) % NUM_HUNTING_PHASES;
        self.remaining = self.durations[self.phase];
        debug!(
            phase = self.phase,
            kind = if self.is_scatter() { "scatter" } else { "chase" },
            "Hunting phase started"
        );
        Some(self.phase)
    }
}
