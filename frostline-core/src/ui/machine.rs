//! Menu state machine

use super::events::{Commit, UiEvent};
use super::menu::MenuItem;
use crate::config::{DeviceConfig, Field};

/// Seconds without input before the menu closes
pub const MENU_TIMEOUT_S: u32 = 30;

/// Menu states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiState {
    /// Status screen
    #[default]
    Idle,
    /// Browsing the menu
    MenuSelect { index: u8 },
    /// Adjusting a draft value
    EditValue { field: Field, draft: i32 },
}

impl UiState {
    /// Process an event and return the next state
    ///
    /// A click in `EditValue` also yields the draft to commit.
    pub fn transition(self, event: UiEvent, config: &DeviceConfig) -> (Self, Option<Commit>) {
        use UiEvent::*;
        use UiState::*;

        match (self, event) {
            (_, Timeout) => (Idle, None),

            // The input that opens the menu is swallowed
            (Idle, Rotate(_) | Click) => (MenuSelect { index: 0 }, None),

            (MenuSelect { index }, Rotate(delta)) => {
                let next = (index as i32 + delta as i32).rem_euclid(MenuItem::COUNT as i32);
                (MenuSelect { index: next as u8 }, None)
            }
            (MenuSelect { index }, Click) => match MenuItem::from_index(index).field() {
                None => (Idle, None),
                Some(field) => (
                    EditValue {
                        field,
                        draft: config.value(field),
                    },
                    None,
                ),
            },

            (EditValue { field, draft }, Rotate(delta)) => (
                EditValue {
                    field,
                    draft: adjust(field, draft, delta, config),
                },
                None,
            ),
            (EditValue { field, draft }, Click) => (
                MenuSelect {
                    index: MenuItem::for_field(field).index(),
                },
                Some(Commit {
                    field,
                    value: draft,
                }),
            ),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, UiState::Idle)
    }
}

/// Move a draft by `delta` detents
fn adjust(field: Field, draft: i32, delta: i16, config: &DeviceConfig) -> i32 {
    if field == Field::Mode {
        return (draft + delta as i32).rem_euclid(2);
    }
    let (min, max) = config.edit_bounds(field);
    draft
        .saturating_add((delta as i32).saturating_mul(field.step()))
        .clamp(min, max)
}

/// Menu state plus the inactivity timer
#[derive(Debug, Clone, Default)]
pub struct UiMachine {
    state: UiState,
    inactive_ms: u32,
}

impl UiMachine {
    pub const fn new() -> Self {
        Self {
            state: UiState::Idle,
            inactive_ms: 0,
        }
    }

    /// Apply one pass worth of encoder input
    ///
    /// The delta is applied before the click. A pass with no input is a
    /// no-op.
    pub fn process_input(&mut self, delta: i16, click: bool, config: &DeviceConfig) -> Option<Commit> {
        if delta == 0 && !click {
            return None;
        }
        self.inactive_ms = 0;

        if self.state.is_idle() {
            self.state = self.state.transition(UiEvent::Click, config).0;
            return None;
        }

        if delta != 0 {
            self.state = self.state.transition(UiEvent::Rotate(delta), config).0;
        }
        if click {
            let (next, commit) = self.state.transition(UiEvent::Click, config);
            self.state = next;
            return commit;
        }
        None
    }

    /// Count display-tick time toward the menu timeout
    ///
    /// Returns true when the menu was closed.
    pub fn on_display_tick(&mut self, elapsed_ms: u32, config: &DeviceConfig) -> bool {
        if self.state.is_idle() {
            return false;
        }
        self.inactive_ms = self.inactive_ms.saturating_add(elapsed_ms);
        if self.inactive_ms < MENU_TIMEOUT_S * 1000 {
            return false;
        }
        self.inactive_ms = 0;
        self.state = self.state.transition(UiEvent::Timeout, config).0;
        true
    }

    pub fn state(&self) -> UiState {
        self.state
    }
}
