//! Buffered UART console port
//!
//! Reception is interrupt driven into a ring buffer, so polling for a byte
//! never waits on the line.

use embassy_rp::uart::{BufferedUart, Error};
use embedded_io::{Read, ReadReady, Write};

pub struct RpUart {
    uart: BufferedUart,
}

impl RpUart {
    pub fn new(uart: BufferedUart) -> Self {
        Self { uart }
    }
}

impl frostline_hal::UartTx for RpUart {
    type Error = Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.uart.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Write::flush(&mut self.uart)
    }
}

impl frostline_hal::UartRx for RpUart {
    type Error = Error;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.uart.read_ready()? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}
