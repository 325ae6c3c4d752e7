//! Line assembly

use heapless::String;

/// Longest accepted command line
pub const LINE_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line longer than [`LINE_CAPACITY`]; the whole line is dropped
    Overflow,
}

/// Accumulates bytes until CR or LF
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    buf: String<LINE_CAPACITY>,
    /// Skipping the rest of an overlong line
    discarding: bool,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            buf: String::new(),
            discarding: false,
        }
    }

    /// Feed one received byte
    ///
    /// Returns a complete, non-blank line when a terminator arrives.
    pub fn push(&mut self, byte: u8) -> Result<Option<String<LINE_CAPACITY>>, LineError> {
        match byte {
            b'\r' | b'\n' => {
                if core::mem::take(&mut self.discarding) {
                    return Ok(None);
                }
                let line = core::mem::take(&mut self.buf);
                if line.trim().is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(line))
                }
            }
            // Backspace / DEL
            0x08 | 0x7F => {
                self.buf.pop();
                Ok(None)
            }
            b if b.is_ascii_graphic() || b == b' ' => {
                if self.discarding {
                    return Ok(None);
                }
                if self.buf.push(b as char).is_err() {
                    self.buf.clear();
                    self.discarding = true;
                    return Err(LineError::Overflow);
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}
