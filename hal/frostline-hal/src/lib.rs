//! Frostline Hardware Abstraction Layer
//!
//! Chip-agnostic traits for the peripherals the relay controller uses.
//! Chip-specific crates implement them; the driver crate builds on them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  frostline-drivers (relay, LCD, probe)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  frostline-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌────────────────┐
//!             │ frostline-hal- │
//!             │     rp2040     │
//!             └────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Relay coil, encoder, door switch
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial console
//! - [`i2c::I2cBus`] - LCD I/O expander
//! - [`onewire::OneWireBus`] - Temperature probe
//! - [`flash::FlashStorage`] - Persistent configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod i2c;
pub mod onewire;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::{InputPin, OutputPin};
pub use i2c::I2cBus;
pub use onewire::{OneWireBus, OneWireError};
pub use uart::{UartRx, UartTx};
