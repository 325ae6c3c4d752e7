//! Duty-cycle timer
//!
//! Two phases alternate forever: Freeze (relay engaged) then Rest (relay
//! released). Elapsed time is counted in whole seconds.

use crate::config::DeviceConfig;

/// Timer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Freeze,
    Rest,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Freeze => "Freeze",
            Phase::Rest => "Rest",
        }
    }

    /// Next phase in the cycle
    pub fn next(self) -> Phase {
        match self {
            Phase::Freeze => Phase::Rest,
            Phase::Rest => Phase::Freeze,
        }
    }

    fn index(self) -> usize {
        match self {
            Phase::Freeze => 0,
            Phase::Rest => 1,
        }
    }
}

/// One row of the phase table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseSpec {
    pub phase: Phase,
    pub duration_s: u32,
    pub relay_engaged: bool,
}

/// Ordered phase table, mirrored from the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTable {
    phases: [PhaseSpec; 2],
}

impl PhaseTable {
    pub fn from_config(config: &DeviceConfig) -> Self {
        Self {
            phases: [
                PhaseSpec {
                    phase: Phase::Freeze,
                    duration_s: config.freeze_duration_s,
                    relay_engaged: true,
                },
                PhaseSpec {
                    phase: Phase::Rest,
                    duration_s: config.rest_duration_s,
                    relay_engaged: false,
                },
            ],
        }
    }

    /// Copy durations from a changed configuration
    pub fn sync(&mut self, config: &DeviceConfig) {
        self.phases[Phase::Freeze.index()].duration_s = config.freeze_duration_s;
        self.phases[Phase::Rest.index()].duration_s = config.rest_duration_s;
    }

    pub fn get(&self, phase: Phase) -> &PhaseSpec {
        &self.phases[phase.index()]
    }
}

/// Current phase and time spent in it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerRuntime {
    phase: Phase,
    elapsed_s: u32,
}

impl Default for TimerRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerRuntime {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Freeze,
            elapsed_s: 0,
        }
    }

    /// Count one elapsed second
    ///
    /// Returns the new phase when the current one has run its full duration.
    /// A duration shortened below the elapsed time ends the phase on the
    /// next second.
    pub fn on_second(&mut self, table: &PhaseTable) -> Option<Phase> {
        self.elapsed_s = self.elapsed_s.saturating_add(1);
        if self.elapsed_s >= table.get(self.phase).duration_s {
            self.phase = self.phase.next();
            self.elapsed_s = 0;
            Some(self.phase)
        } else {
            None
        }
    }

    /// Start over at the beginning of Freeze
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed_s(&self) -> u32 {
        self.elapsed_s
    }

    /// Seconds left in the current phase
    pub fn remaining_s(&self, table: &PhaseTable) -> u32 {
        table.get(self.phase).duration_s.saturating_sub(self.elapsed_s)
    }
}
