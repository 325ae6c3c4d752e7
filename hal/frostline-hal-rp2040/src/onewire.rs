//! Bit-banged 1-Wire master
//!
//! Standard-speed timing. The pin idles as an input and is pulled high by
//! the external 4.7k resistor; the master only ever drives it low. Each
//! time slot runs inside a critical section so the tick interrupt cannot
//! stretch it.

use embassy_rp::gpio::{Flex, Pull};
use embassy_time::{block_for, Duration};
use frostline_hal::{OneWireBus, OneWireError};

pub struct RpOneWire<'d> {
    pin: Flex<'d>,
}

impl<'d> RpOneWire<'d> {
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::None);
        pin.set_low();
        pin.set_as_input();
        Self { pin }
    }

    fn drive_low(&mut self) {
        self.pin.set_low();
        self.pin.set_as_output();
    }

    fn release(&mut self) {
        self.pin.set_as_input();
    }

    fn write_bit(&mut self, bit: bool) {
        let (low_us, recovery_us) = if bit { (6, 64) } else { (60, 10) };
        critical_section::with(|_| {
            self.drive_low();
            block_for(Duration::from_micros(low_us));
            self.release();
            block_for(Duration::from_micros(recovery_us));
        });
    }

    fn read_bit(&mut self) -> bool {
        critical_section::with(|_| {
            self.drive_low();
            block_for(Duration::from_micros(6));
            self.release();
            block_for(Duration::from_micros(9));
            let bit = self.pin.is_high();
            block_for(Duration::from_micros(55));
            bit
        })
    }
}

impl OneWireBus for RpOneWire<'_> {
    fn reset(&mut self) -> Result<(), OneWireError> {
        if self.pin.is_low() {
            return Err(OneWireError::BusStuckLow);
        }

        self.drive_low();
        block_for(Duration::from_micros(480));

        let present = critical_section::with(|_| {
            self.release();
            block_for(Duration::from_micros(70));
            self.pin.is_low()
        });
        block_for(Duration::from_micros(410));

        if !present {
            return Err(OneWireError::NoPresence);
        }
        if self.pin.is_low() {
            return Err(OneWireError::BusStuckLow);
        }
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), OneWireError> {
        for i in 0..8 {
            self.write_bit(byte & (1 << i) != 0);
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, OneWireError> {
        let mut byte = 0u8;
        for i in 0..8 {
            if self.read_bit() {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }
}
