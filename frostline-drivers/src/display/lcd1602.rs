//! HD44780 16x2 LCD behind a PCF8574 I2C backpack
//!
//! The expander drives the controller in 4-bit mode:
//!
//! ```text
//! PCF8574  P7 P6 P5 P4  P3  P2 P1 P0
//! HD44780  D7 D6 D5 D4  BL  E  RW RS
//! ```
//!
//! Every nibble is sent as two expander writes, E high then E low, so the
//! controller latches on the falling edge.

use embedded_hal::delay::DelayNs;
use frostline_core::traits::{CharDisplay, DisplayError, DISPLAY_COLS};
use frostline_hal::I2cBus;
use heapless::Vec;

/// Usual backpack address (PCF8574T with A0..A2 open)
pub const DEFAULT_ADDRESS: u8 = 0x27;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of each line
const LINE_ADDRESS: [u8; 2] = [0x00, 0x40];

/// Expander bytes for one full line of characters
const LINE_BYTES: usize = DISPLAY_COLS * 4;

pub struct Lcd1602<I, D> {
    i2c: I,
    delay: D,
    address: u8,
    initialized: bool,
}

impl<I: I2cBus, D: DelayNs> Lcd1602<I, D> {
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            initialized: false,
        }
    }

    /// Run the 4-bit initialization sequence and clear the screen
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(50);

        // Force 8-bit mode from any state, then switch to 4-bit
        self.write_nibble(0x30, false)?;
        self.delay.delay_us(4_100);
        self.write_nibble(0x30, false)?;
        self.delay.delay_us(100);
        self.write_nibble(0x30, false)?;
        self.delay.delay_us(100);
        self.write_nibble(0x20, false)?;
        self.delay.delay_us(100);

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        self.command(CMD_ENTRY_MODE_INC)?;

        self.initialized = true;
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        let mut buf: Vec<u8, 4> = Vec::new();
        push_byte(&mut buf, cmd, false);
        self.send(&buf)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8, rs: bool) -> Result<(), DisplayError> {
        let mut buf: Vec<u8, 2> = Vec::new();
        push_nibble(&mut buf, nibble, rs);
        self.send(&buf)
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, bytes)
            .map_err(|_| DisplayError::Bus)
    }
}

impl<I: I2cBus, D: DelayNs> CharDisplay for Lcd1602<I, D> {
    fn write_lines(&mut self, top: &str, bottom: &str) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        for (address, text) in LINE_ADDRESS.into_iter().zip([top, bottom]) {
            self.command(CMD_SET_DDRAM | address)?;

            let mut buf: Vec<u8, LINE_BYTES> = Vec::new();
            let mut chars = text.bytes();
            for _ in 0..DISPLAY_COLS {
                let c = match chars.next() {
                    Some(c) if c.is_ascii() && !c.is_ascii_control() => c,
                    Some(_) => b'?',
                    None => b' ',
                };
                push_byte(&mut buf, c, true);
            }
            self.send(&buf)?;
        }
        Ok(())
    }
}

/// Append the E-high/E-low pair for the upper four bits of `nibble`
fn push_nibble<const N: usize>(buf: &mut Vec<u8, N>, nibble: u8, rs: bool) {
    let data = (nibble & 0xF0) | BACKLIGHT | if rs { RS } else { 0 };
    let _ = buf.push(data | EN);
    let _ = buf.push(data);
}

fn push_byte<const N: usize>(buf: &mut Vec<u8, N>, byte: u8, rs: bool) {
    push_nibble(buf, byte, rs);
    push_nibble(buf, byte << 4, rs);
}
