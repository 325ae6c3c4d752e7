//! Encoder and push-button input

pub mod debounce;

pub use debounce::{EncoderDebouncer, BUTTON_STABLE_SAMPLES};
