//! GPIO pin abstractions
//!
//! Levels here are electrical. Drivers translate them to logical states
//! (relay engaged, button pressed) and own any inversion.

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high
    fn set_high(&mut self);

    /// Drive the pin low
    fn set_low(&mut self);

    /// Drive the pin to the given level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check the level the pin is being driven to
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high
    fn is_high(&self) -> bool;

    /// Check if the pin reads low
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
