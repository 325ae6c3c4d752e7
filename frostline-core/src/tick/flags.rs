//! Flag exchange between the tick interrupt and the main loop
//!
//! This is the only state shared between the two contexts. Every access
//! runs inside a critical section.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::{Tick, TickSet};

/// Sticky per-activity request flags
///
/// Raising an already pending flag is a no-op: occurrences coalesce.
pub struct TickFlags {
    pending: Mutex<CriticalSectionRawMutex, Cell<TickSet>>,
}

impl TickFlags {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(TickSet::EMPTY)),
        }
    }

    /// Set one flag (interrupt context)
    pub fn raise(&self, tick: Tick) {
        self.raise_all(tick.into());
    }

    /// Set several flags at once (interrupt context)
    pub fn raise_all(&self, ticks: TickSet) {
        if ticks.is_empty() {
            return;
        }
        self.pending.lock(|p| p.set(p.get().union(ticks)));
    }

    /// Test-and-clear one flag
    pub fn consume(&self, tick: Tick) -> bool {
        self.pending.lock(|p| {
            let mut set = p.get();
            let was_set = set.contains(tick);
            set.remove(tick);
            p.set(set);
            was_set
        })
    }

    /// Take every pending flag in one critical section
    pub fn drain(&self) -> TickSet {
        self.pending.lock(|p| p.replace(TickSet::EMPTY))
    }

    /// Raise every flag once so all activities run on the first pass
    pub fn kickstart(&self) {
        self.raise_all(TickSet::ALL);
    }

    /// Snapshot of the pending flags without clearing them
    pub fn pending(&self) -> TickSet {
        self.pending.lock(|p| p.get())
    }
}

impl Default for TickFlags {
    fn default() -> Self {
        Self::new()
    }
}
