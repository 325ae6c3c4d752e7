//! Serial console over a UART

use frostline_core::traits::Console;
use frostline_hal::{UartRx, UartTx};

/// Console on a UART
///
/// Receive errors (framing, overrun) drop the byte; transmit errors are
/// ignored since there is nowhere to report them.
pub struct UartConsole<U> {
    uart: U,
}

impl<U: UartTx + UartRx> UartConsole<U> {
    pub fn new(uart: U) -> Self {
        Self { uart }
    }
}

impl<U: UartTx + UartRx> Console for UartConsole<U> {
    fn read_byte(&mut self) -> Option<u8> {
        self.uart.try_read_byte().ok().flatten()
    }

    fn write_str(&mut self, text: &str) {
        let _ = self.uart.write_blocking(text.as_bytes());
    }
}
