//! SysTick-driven tick source
//!
//! SysTick fires every millisecond. The handler advances the countdowns and
//! raises due ticks in [`TICK_FLAGS`]; the main loop drains them. The
//! embassy time driver runs on the TIMER peripheral, so SysTick is free.

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use cortex_m_rt::exception;
use frostline_core::{TickFlags, TickPeriods, TickSource};

/// Tick interrupt rate
pub const TICK_HZ: u32 = 1_000;

/// Flags shared between the SysTick handler and the main loop
pub static TICK_FLAGS: TickFlags = TickFlags::new();

/// Start the 1 ms SysTick interrupt from the core clock
pub fn start(mut syst: SYST, core_clock_hz: u32) {
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(core_clock_hz / TICK_HZ - 1);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();
}

#[exception]
fn SysTick() {
    static mut SOURCE: TickSource = TickSource::new(TickPeriods::DEFAULT);
    SOURCE.on_interrupt(&TICK_FLAGS);
}
