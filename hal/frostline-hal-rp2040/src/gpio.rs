//! GPIO wrappers

use embassy_rp::gpio::{Input, Output};

/// Push-pull output pin
pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl frostline_hal::OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Input pin
pub struct RpInput<'d> {
    pin: Input<'d>,
}

impl<'d> RpInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl frostline_hal::InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
