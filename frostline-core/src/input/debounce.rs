//! Quadrature decoding and button debouncing
//!
//! Sampled at the encoder cadence (5 ms). Rotation is decoded on the rising
//! edge of channel A only, which gives one step per detent on common
//! mechanical encoders. The button must read the same level for
//! [`BUTTON_STABLE_SAMPLES`] consecutive samples before a change is
//! accepted.

use crate::traits::EncoderSample;

/// Consecutive equal samples required to accept a button level
pub const BUTTON_STABLE_SAMPLES: u8 = 3;

/// Encoder runtime state plus undelivered events
#[derive(Debug, Clone, Default)]
pub struct EncoderDebouncer {
    /// First sample only records levels
    primed: bool,
    last_a: bool,
    last_b: bool,
    last_button_sample: bool,
    stable_button_state: bool,
    stable_counter: u8,
    pending_delta: i16,
    pending_click: bool,
}

impl EncoderDebouncer {
    pub const fn new() -> Self {
        Self {
            primed: false,
            last_a: false,
            last_b: false,
            last_button_sample: false,
            stable_button_state: false,
            stable_counter: 0,
            pending_delta: 0,
            pending_click: false,
        }
    }

    /// Feed one sample
    pub fn sample(&mut self, s: EncoderSample) {
        if !self.primed {
            self.primed = true;
            self.last_a = s.a;
            self.last_b = s.b;
            self.last_button_sample = s.pressed;
            self.stable_button_state = s.pressed;
            self.stable_counter = BUTTON_STABLE_SAMPLES;
            return;
        }

        if s.a && !self.last_a {
            let step = if s.b { -1 } else { 1 };
            self.pending_delta = self.pending_delta.wrapping_add(step);
        }
        self.last_a = s.a;
        self.last_b = s.b;

        if s.pressed == self.last_button_sample {
            self.stable_counter = self.stable_counter.saturating_add(1);
        } else {
            self.last_button_sample = s.pressed;
            self.stable_counter = 1;
        }

        if self.stable_counter >= BUTTON_STABLE_SAMPLES && s.pressed != self.stable_button_state {
            // Released after a stable press
            if self.stable_button_state && !s.pressed {
                self.pending_click = true;
            }
            self.stable_button_state = s.pressed;
        }
    }

    /// Take the accumulated step count
    pub fn consume_delta(&mut self) -> i16 {
        core::mem::take(&mut self.pending_delta)
    }

    /// Take the pending click
    pub fn consume_click(&mut self) -> bool {
        core::mem::take(&mut self.pending_click)
    }

    /// Debounced button level
    pub fn is_pressed(&self) -> bool {
        self.stable_button_state
    }
}
