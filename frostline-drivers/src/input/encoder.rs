//! Rotary encoder on three GPIO inputs
//!
//! The push-button is wired to ground with a pull-up, so it reads low
//! while pressed.

use frostline_core::traits::{EncoderInputs, EncoderSample};
use frostline_hal::InputPin;

pub struct GpioEncoder<A, B, S> {
    a: A,
    b: B,
    button: S,
}

impl<A: InputPin, B: InputPin, S: InputPin> GpioEncoder<A, B, S> {
    pub fn new(a: A, b: B, button: S) -> Self {
        Self { a, b, button }
    }
}

impl<A: InputPin, B: InputPin, S: InputPin> EncoderInputs for GpioEncoder<A, B, S> {
    fn sample(&mut self) -> EncoderSample {
        EncoderSample {
            a: self.a.is_high(),
            b: self.b.is_high(),
            pressed: self.button.is_low(),
        }
    }
}
