//! Periodic tick signals
//!
//! A single 1 ms timer interrupt drives six independent cadences. Each
//! cadence raises a sticky flag when its period elapses; the main loop
//! drains the flags and runs the matching activity.
//!
//! ```text
//! ┌─────────────┐ raise  ┌────────────┐ drain  ┌────────────┐
//! │ TickSource  │───────▶│ TickFlags  │───────▶│ Dispatcher │
//! │ (interrupt) │        │ (critical) │        │ (main loop)│
//! └─────────────┘        └────────────┘        └────────────┘
//! ```

pub mod flags;
pub mod source;

pub use flags::TickFlags;
pub use source::{TickPeriods, TickSource};

/// Periodic activities, in dispatch priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Tick {
    /// Door switch sample
    Door = 0,
    /// Temperature probe poll
    Temperature = 1,
    /// Elapsed second (timer mode)
    Second = 2,
    /// Thermostat evaluation (thermostat mode)
    Thermostat = 3,
    /// Encoder and button sample
    Encoder = 4,
    /// Display refresh
    Display = 5,
}

impl Tick {
    /// All ticks, highest priority first
    pub const ALL: [Tick; 6] = [
        Tick::Door,
        Tick::Temperature,
        Tick::Second,
        Tick::Thermostat,
        Tick::Encoder,
        Tick::Display,
    ];

    /// Bit in a [`TickSet`]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of ticks packed into one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickSet(u8);

impl TickSet {
    pub const EMPTY: TickSet = TickSet(0);
    pub const ALL: TickSet = TickSet(0x3F);

    pub const fn contains(self, tick: Tick) -> bool {
        self.0 & tick.bit() != 0
    }

    pub fn insert(&mut self, tick: Tick) {
        self.0 |= tick.bit();
    }

    pub fn remove(&mut self, tick: Tick) {
        self.0 &= !tick.bit();
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn union(self, other: TickSet) -> TickSet {
        TickSet(self.0 | other.0)
    }

    /// Iterate members in priority order
    pub fn iter(self) -> impl Iterator<Item = Tick> {
        Tick::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl From<Tick> for TickSet {
    fn from(tick: Tick) -> Self {
        TickSet(tick.bit())
    }
}
