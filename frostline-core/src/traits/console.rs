//! Serial console trait

/// Line-oriented serial console
///
/// Reads must never block: `read_byte` returns `None` when no byte is
/// buffered. Output is best effort.
pub trait Console {
    /// Take one received byte, if any
    fn read_byte(&mut self) -> Option<u8>;

    /// Write text to the console
    fn write_str(&mut self, text: &str);

    /// Write text followed by CR LF
    fn write_line(&mut self, text: &str) {
        self.write_str(text);
        self.write_str("\r\n");
    }
}
