//! Character display trait

/// Number of character columns per line
pub const DISPLAY_COLS: usize = 16;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Controller has not been initialized
    NotInitialized,
}

/// Trait for a two-line character display
///
/// The display does no wrapping or scrolling: the caller passes lines that
/// are already padded or truncated to [`DISPLAY_COLS`] characters.
pub trait CharDisplay {
    /// Replace both lines of the display
    fn write_lines(&mut self, top: &str, bottom: &str) -> Result<(), DisplayError>;
}
