//! Collaborator traits
//!
//! These traits define the interface between the core logic and the
//! hardware-specific implementations supplied by the driver crates.

pub mod console;
pub mod display;
pub mod input;
pub mod relay;
pub mod sensor;
pub mod storage;

pub use console::Console;
pub use display::{CharDisplay, DisplayError, DISPLAY_COLS};
pub use input::{EncoderInputs, EncoderSample};
pub use relay::RelayOutput;
pub use sensor::{DoorSensor, NoDoor, SensorError, TemperatureProbe};
pub use storage::{ConfigStore, StoreError};
