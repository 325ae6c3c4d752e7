//! Blocking I2C master

use embassy_rp::i2c::{Blocking, Config, Error, I2c, Instance};
use frostline_hal::i2c::I2cConfig;

/// I2C bus wrapper
pub struct RpI2c<'d, T: Instance> {
    i2c: I2c<'d, T, Blocking>,
}

impl<'d, T: Instance> RpI2c<'d, T> {
    pub fn new(i2c: I2c<'d, T, Blocking>) -> Self {
        Self { i2c }
    }
}

/// Translate the chip-agnostic bus configuration
pub fn config(cfg: I2cConfig) -> Config {
    let mut config = Config::default();
    config.frequency = cfg.frequency;
    config
}

impl<T: Instance> frostline_hal::I2cBus for RpI2c<'_, T> {
    type Error = Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.blocking_write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.blocking_read(address, buf)
    }
}
