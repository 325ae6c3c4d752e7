//! Serial command line
//!
//! Received bytes are assembled into lines and parsed into [`Command`]s.
//! Commands go through the same configuration setters as the menu.

pub mod command;
pub mod line;

pub use command::{parse, Command, CommandError, HELP};
pub use line::{LineBuffer, LineError, LINE_CAPACITY};
