//! RP2040 implementations of the Frostline HAL traits
//!
//! Thin wrappers around `embassy-rp` blocking drivers:
//!
//! - GPIO outputs and inputs
//! - Bit-banged 1-Wire master on a flexible pin
//! - Blocking I2C master
//! - Buffered UART console
//! - Flash storage driver (implements `frostline_hal::FlashStorage`)

#![no_std]

pub mod flash;
pub mod gpio;
pub mod i2c;
pub mod onewire;
pub mod uart;
