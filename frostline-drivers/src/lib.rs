//! Hardware driver implementations
//!
//! Concrete implementations of the collaborator traits defined in
//! frostline-core, built on the frostline-hal peripheral traits:
//!
//! - Relay output on a GPIO pin
//! - DS18B20 temperature probe on 1-Wire
//! - HD44780 16x2 LCD behind a PCF8574 I2C backpack
//! - Rotary encoder and door switch inputs
//! - UART serial console

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod console;
pub mod display;
pub mod input;
pub mod relay;
pub mod sensor;

#[cfg(test)]
pub(crate) mod mock;
