//! GPIO relay output
//!
//! Drives the compressor relay coil through a transistor, SSR or relay
//! module. Many relay modules are active-low.

use frostline_core::traits::RelayOutput;
use frostline_hal::OutputPin;

/// Relay on a GPIO pin
pub struct GpioRelay<P> {
    pin: P,
    /// If true, relay engaged = pin LOW
    inverted: bool,
    engaged: bool,
}

impl<P: OutputPin> GpioRelay<P> {
    /// Create a relay output, released
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut relay = Self {
            pin,
            inverted,
            engaged: false,
        };
        relay.set_engaged(false);
        relay
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> RelayOutput for GpioRelay<P> {
    fn set_engaged(&mut self, engaged: bool) {
        self.engaged = engaged;
        self.pin.set_state(engaged != self.inverted);
    }

    fn is_engaged(&self) -> bool {
        self.engaged
    }
}
