//! Shared test doubles for peripheral traits

use core::cell::Cell;

use frostline_hal::{InputPin, OutputPin};

/// Output pin recording its level
#[derive(Debug, Default)]
pub struct MockPin {
    pub high: bool,
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input pin whose level the test sets through a shared cell
#[derive(Debug, Default)]
pub struct MockInput<'a> {
    pub level: Option<&'a Cell<bool>>,
}

impl<'a> MockInput<'a> {
    pub fn new(level: &'a Cell<bool>) -> Self {
        Self { level: Some(level) }
    }
}

impl InputPin for MockInput<'_> {
    fn is_high(&self) -> bool {
        self.level.map(Cell::get).unwrap_or(true)
    }
}
