//! Events that drive the menu state machine

use crate::config::Field;

/// Menu input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiEvent {
    /// Encoder turned by a number of detents (positive clockwise)
    Rotate(i16),
    /// Button pressed and released
    Click,
    /// No input for the menu timeout
    Timeout,
}

/// A draft value confirmed by the user
///
/// The value is already clamped to the field's editing bounds; the caller
/// passes it to the configuration setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Commit {
    pub field: Field,
    pub value: i32,
}
