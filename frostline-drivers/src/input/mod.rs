//! Encoder and door switch inputs

pub mod door;
pub mod encoder;

pub use door::GpioDoor;
pub use encoder::GpioEncoder;
