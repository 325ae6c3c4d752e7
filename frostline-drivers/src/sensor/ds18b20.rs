//! DS18B20 digital thermometer
//!
//! Single probe on a dedicated 1-Wire bus, addressed with Skip ROM.
//! Readings are 12-bit (1/16°C) and take up to 750 ms to convert.

use frostline_core::traits::{SensorError, TemperatureProbe};
use frostline_hal::onewire::{crc8, OneWireBus, OneWireError};

const CMD_SKIP_ROM: u8 = 0xCC;
const CMD_CONVERT_T: u8 = 0x44;
const CMD_READ_SCRATCHPAD: u8 = 0xBE;
const CMD_WRITE_SCRATCHPAD: u8 = 0x4E;

/// Configuration register value for 12-bit resolution
const CONFIG_12_BIT: u8 = 0x7F;

/// Scratchpad value before the first conversion (+85.0°C)
const POWER_ON_RAW: i16 = 0x0550;

/// Measurable range (°C × 10)
const MIN_TEMP_X10: i16 = -550;
const MAX_TEMP_X10: i16 = 1250;

fn bus_error(e: OneWireError) -> SensorError {
    match e {
        OneWireError::NoPresence => SensorError::NotPresent,
        OneWireError::BusStuckLow => SensorError::Bus,
    }
}

/// DS18B20 on a 1-Wire bus
pub struct Ds18b20<B> {
    bus: B,
}

impl<B: OneWireBus> Ds18b20<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Select 12-bit resolution (alarm registers cleared)
    pub fn configure(&mut self) -> Result<(), SensorError> {
        self.command(CMD_WRITE_SCRATCHPAD)?;
        for byte in [0x00, 0x00, CONFIG_12_BIT] {
            self.bus.write_byte(byte).map_err(bus_error)?;
        }
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<(), SensorError> {
        self.bus.reset().map_err(bus_error)?;
        self.bus.write_byte(CMD_SKIP_ROM).map_err(bus_error)?;
        self.bus.write_byte(cmd).map_err(bus_error)
    }

    fn read_scratchpad(&mut self) -> Result<[u8; 9], SensorError> {
        self.command(CMD_READ_SCRATCHPAD)?;
        let mut scratchpad = [0u8; 9];
        self.bus.read_bytes(&mut scratchpad).map_err(bus_error)?;
        if crc8(&scratchpad) != 0 {
            return Err(SensorError::CrcMismatch);
        }
        Ok(scratchpad)
    }
}

impl<B: OneWireBus> TemperatureProbe for Ds18b20<B> {
    fn request_conversion(&mut self) -> Result<(), SensorError> {
        self.command(CMD_CONVERT_T)
    }

    fn read_last_result_x10(&mut self) -> Result<i16, SensorError> {
        let scratchpad = self.read_scratchpad()?;
        let raw = i16::from_le_bytes([scratchpad[0], scratchpad[1]]);
        if raw == POWER_ON_RAW {
            return Err(SensorError::NotReady);
        }

        let temp_x10 = raw_to_x10(raw);
        if !(MIN_TEMP_X10..=MAX_TEMP_X10).contains(&temp_x10) {
            return Err(SensorError::OutOfRange);
        }
        Ok(temp_x10)
    }
}

/// Convert 1/16°C to 1/10°C, rounding half away from zero
fn raw_to_x10(raw: i16) -> i16 {
    let scaled = raw as i32 * 10;
    let rounded = if scaled >= 0 {
        (scaled + 8) / 16
    } else {
        (scaled - 8) / 16
    };
    rounded as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bus replaying a scratchpad and recording written bytes
    struct MockBus {
        present: bool,
        scratchpad: [u8; 9],
        read_pos: usize,
        written: heapless::Vec<u8, 32>,
    }

    impl MockBus {
        fn with_raw(raw: i16) -> Self {
            let mut scratchpad = [0u8; 9];
            scratchpad[..2].copy_from_slice(&raw.to_le_bytes());
            scratchpad[2..8].copy_from_slice(&[0x4B, 0x46, 0x7F, 0xFF, 0x0C, 0x10]);
            scratchpad[8] = crc8(&scratchpad[..8]);
            Self {
                present: true,
                scratchpad,
                read_pos: 0,
                written: heapless::Vec::new(),
            }
        }
    }

    impl OneWireBus for MockBus {
        fn reset(&mut self) -> Result<(), OneWireError> {
            self.read_pos = 0;
            if self.present {
                Ok(())
            } else {
                Err(OneWireError::NoPresence)
            }
        }

        fn write_byte(&mut self, byte: u8) -> Result<(), OneWireError> {
            let _ = self.written.push(byte);
            Ok(())
        }

        fn read_byte(&mut self) -> Result<u8, OneWireError> {
            let byte = self.scratchpad.get(self.read_pos).copied().unwrap_or(0xFF);
            self.read_pos += 1;
            Ok(byte)
        }
    }

    #[test]
    fn test_conversion_request() {
        let mut probe = Ds18b20::new(MockBus::with_raw(0));
        probe.request_conversion().unwrap();
        assert_eq!(probe.bus.written.as_slice(), &[CMD_SKIP_ROM, CMD_CONVERT_T]);
    }

    #[test]
    fn test_reads_negative_temperature() {
        // -18.5°C is -296/16
        let mut probe = Ds18b20::new(MockBus::with_raw(-296));
        assert_eq!(probe.read_last_result_x10(), Ok(-185));
    }

    #[test]
    fn test_datasheet_values() {
        assert_eq!(raw_to_x10(0x07D0), 1250);
        assert_eq!(raw_to_x10(0x0191), 251); // +25.0625
        assert_eq!(raw_to_x10(0xFFF8u16 as i16), -5);
        assert_eq!(raw_to_x10(0xFF5Eu16 as i16), -101); // -10.125
        assert_eq!(raw_to_x10(0xFC90u16 as i16), -550);
    }

    #[test]
    fn test_power_on_value_not_ready() {
        let mut probe = Ds18b20::new(MockBus::with_raw(POWER_ON_RAW));
        assert_eq!(probe.read_last_result_x10(), Err(SensorError::NotReady));
    }

    #[test]
    fn test_crc_mismatch() {
        let mut bus = MockBus::with_raw(-296);
        bus.scratchpad[0] ^= 0x01;
        let mut probe = Ds18b20::new(bus);
        assert_eq!(probe.read_last_result_x10(), Err(SensorError::CrcMismatch));
    }

    #[test]
    fn test_missing_probe() {
        let mut bus = MockBus::with_raw(0);
        bus.present = false;
        let mut probe = Ds18b20::new(bus);
        assert_eq!(probe.request_conversion(), Err(SensorError::NotPresent));
    }

    #[test]
    fn test_configure_writes_resolution() {
        let mut probe = Ds18b20::new(MockBus::with_raw(0));
        probe.configure().unwrap();
        assert_eq!(
            probe.bus.written.as_slice(),
            &[CMD_SKIP_ROM, CMD_WRITE_SCRATCHPAD, 0x00, 0x00, CONFIG_12_BIT]
        );
    }
}
