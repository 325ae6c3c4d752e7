//! Over-cooling cutoff for timer mode
//!
//! The timer drives the relay blindly; this latch forces the relay off once
//! the cabinet reaches the stop temperature and holds it off until the
//! temperature has recovered to the resume temperature.

/// Pause latch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SafetyCutoff {
    pause_active: bool,
}

impl SafetyCutoff {
    pub const fn new() -> Self {
        Self {
            pause_active: false,
        }
    }

    /// Update the latch with the live temperature
    ///
    /// With no reading the cutoff is disabled and the latch released, so
    /// the timer phase alone drives the relay.
    ///
    /// Returns whether the relay is paused.
    pub fn update(&mut self, temp_x10: Option<i16>, stop_x10: i16, resume_x10: i16) -> bool {
        match temp_x10 {
            None => self.pause_active = false,
            Some(t) if t <= stop_x10 => self.pause_active = true,
            Some(t) if t >= resume_x10 => self.pause_active = false,
            Some(_) => {}
        }
        self.pause_active
    }

    /// Release the latch unconditionally
    pub fn release(&mut self) {
        self.pause_active = false;
    }

    pub fn is_paused(&self) -> bool {
        self.pause_active
    }
}
