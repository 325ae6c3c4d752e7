//! Door switch
//!
//! A reed or micro switch; which level means "open" depends on the
//! switch type, so it is configurable.

use frostline_core::traits::DoorSensor;
use frostline_hal::InputPin;

pub struct GpioDoor<P> {
    pin: P,
    /// Pin level that means the door is open
    open_high: bool,
}

impl<P: InputPin> GpioDoor<P> {
    pub fn new(pin: P, open_high: bool) -> Self {
        Self { pin, open_high }
    }
}

impl<P: InputPin> DoorSensor for GpioDoor<P> {
    fn is_open(&mut self) -> bool {
        self.pin.is_high() == self.open_high
    }
}
