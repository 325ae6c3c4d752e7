//! 1-Wire bus abstractions
//!
//! Byte-level access to a 1-Wire bus with a single device, plus the
//! Dallas/Maxim CRC used to check scratchpad and ROM data.

/// Errors from 1-Wire transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OneWireError {
    /// Bus held low by a device or a short
    BusStuckLow,
    /// No presence pulse after reset
    NoPresence,
}

/// 1-Wire bus master
pub trait OneWireBus {
    /// Issue a reset pulse
    ///
    /// Succeeds when at least one device answered with a presence pulse.
    fn reset(&mut self) -> Result<(), OneWireError>;

    /// Write one byte, LSB first
    fn write_byte(&mut self, byte: u8) -> Result<(), OneWireError>;

    /// Read one byte, LSB first
    fn read_byte(&mut self) -> Result<u8, OneWireError>;

    /// Read into `buf`
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), OneWireError> {
        for byte in buf.iter_mut() {
            *byte = self.read_byte()?;
        }
        Ok(())
    }
}

/// Dallas/Maxim CRC-8 (polynomial x^8 + x^5 + x^4 + 1, reflected)
///
/// Running the CRC over data that ends with its own CRC byte yields zero.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        let mut b = byte;
        for _ in 0..8 {
            let mix = (crc ^ b) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            b >>= 1;
        }
    }
    crc
}
