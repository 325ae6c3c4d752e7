//! Tick source
//!
//! Advanced once per base tick (1 ms) from the timer interrupt. Performs
//! no I/O; its only side effect is raising flags.

use super::{Tick, TickFlags, TickSet};

/// Period of each activity, in base ticks (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickPeriods {
    pub door: u16,
    pub temperature: u16,
    pub second: u16,
    pub thermostat: u16,
    pub encoder: u16,
    pub display: u16,
}

impl TickPeriods {
    pub const DEFAULT: TickPeriods = TickPeriods {
        door: 50,
        temperature: 250,
        second: 1000,
        thermostat: 500,
        encoder: 5,
        display: 250,
    };

    /// Period of one activity in base ticks
    pub const fn period(&self, tick: Tick) -> u16 {
        match tick {
            Tick::Door => self.door,
            Tick::Temperature => self.temperature,
            Tick::Second => self.second,
            Tick::Thermostat => self.thermostat,
            Tick::Encoder => self.encoder,
            Tick::Display => self.display,
        }
    }

    /// Period of one activity in milliseconds
    pub const fn period_ms(&self, tick: Tick) -> u32 {
        self.period(tick) as u32
    }
}

impl Default for TickPeriods {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Free-running counters, one per activity
pub struct TickSource {
    periods: TickPeriods,
    counters: [u16; 6],
}

impl TickSource {
    pub const fn new(periods: TickPeriods) -> Self {
        Self {
            periods,
            counters: [0; 6],
        }
    }

    /// Advance every counter by one base tick
    ///
    /// Returns the activities whose period elapsed on this tick. A zero
    /// period fires on every tick.
    pub fn advance(&mut self) -> TickSet {
        let mut fired = TickSet::EMPTY;
        for tick in Tick::ALL {
            let period = self.periods.period(tick).max(1);
            let counter = &mut self.counters[tick as usize];
            *counter = counter.saturating_add(1);
            if *counter >= period {
                *counter = 0;
                fired.insert(tick);
            }
        }
        fired
    }

    /// Interrupt handler body: advance and raise what fired
    pub fn on_interrupt(&mut self, flags: &TickFlags) {
        flags.raise_all(self.advance());
    }
}
