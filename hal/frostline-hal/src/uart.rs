//! UART serial communication abstractions
//!
//! The console must never stall the main loop: transmit may block briefly
//! while the FIFO drains, receive never blocks.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write all of `data`
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Take one received byte if one is buffered
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error>;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self { baudrate: 115_200 }
    }
}
