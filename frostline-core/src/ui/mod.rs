//! Menu user interface
//!
//! Encoder rotation and clicks drive a three-level state machine:
//!
//! ```text
//! Idle ──any input──▶ MenuSelect ──click──▶ EditValue
//!  ▲                   │      ▲                │
//!  └───click Exit──────┘      └─────click──────┘ (commit)
//! ```
//!
//! Thirty seconds without input from either menu level returns to Idle
//! and discards any draft.

pub mod events;
pub mod machine;
pub mod menu;

pub use events::{Commit, UiEvent};
pub use machine::{UiMachine, UiState, MENU_TIMEOUT_S};
pub use menu::MenuItem;
