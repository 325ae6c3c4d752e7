//! Encoder input trait

/// One raw sample of the encoder pins
///
/// Levels are logical: `pressed` is true while the button is held,
/// regardless of the pin's electrical polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderSample {
    /// Channel A level
    pub a: bool,
    /// Channel B level
    pub b: bool,
    /// Push-button held
    pub pressed: bool,
}

/// Trait for reading the rotary encoder and its push-button
pub trait EncoderInputs {
    /// Sample all three inputs at once
    fn sample(&mut self) -> EncoderSample;
}
