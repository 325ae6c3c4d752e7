//! Board-agnostic core logic for the relay controller firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Tick flags shared with the timer interrupt, and the tick source itself
//! - Cooperative dispatcher that drains the flags once per main-loop pass
//! - Encoder/button debouncing
//! - Relay control policy (duty-cycle timer, thermostat, safety cutoff)
//! - Menu state machine and screen rendering
//! - Versioned device configuration and the serial command grammar
//! - Collaborator traits (relay, probe, display, storage, console)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod control;
pub mod device;
pub mod dispatcher;
pub mod input;
pub mod probe;
pub mod safety;
pub mod screen;
pub mod tick;
pub mod traits;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, Configuration, DeviceConfig, Field, OperatingMode};
pub use device::{Device, Status};
pub use dispatcher::{Board, Dispatcher, PassReport};
pub use tick::{Tick, TickFlags, TickPeriods, TickSet, TickSource};
