//! I2C bus abstractions

/// I2C bus master
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write `data` to the 7-bit `address`
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read into `buf` from the 7-bit `address`
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };
}
