//! Command grammar
//!
//! ```text
//! mode [timer|thermostat]
//! temp <°C>
//! frost time <seconds>
//! frost temp <stop °C> <resume °C>
//! wait time <seconds>
//! status
//! help
//! ```
//!
//! Keywords are case-insensitive. Temperatures take at most one decimal.

use super::line::LineError;
use crate::config::{ConfigError, OperatingMode};

/// Parsed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Report the mode, or switch to the given one
    Mode(Option<OperatingMode>),
    /// Set the thermostat target (°C × 10)
    Temp(i16),
    /// Set the freeze phase duration
    FrostTime(u32),
    /// Set the timer cutoff pair (°C × 10)
    FrostTemp { stop_x10: i16, resume_x10: i16 },
    /// Set the rest phase duration
    WaitTime(u32),
    Status,
    Help,
}

/// Command failures, each reported as one diagnostic line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    Empty,
    Unknown,
    MissingArgument,
    UnexpectedArgument,
    InvalidNumber,
    InvalidMode,
    /// Line exceeded the input buffer
    LineTooLong,
    /// Rejected by the configuration setter
    Config(ConfigError),
}

impl From<ConfigError> for CommandError {
    fn from(e: ConfigError) -> Self {
        CommandError::Config(e)
    }
}

impl From<LineError> for CommandError {
    fn from(e: LineError) -> Self {
        match e {
            LineError::Overflow => CommandError::LineTooLong,
        }
    }
}

impl CommandError {
    /// Diagnostic text
    pub fn message(&self) -> &'static str {
        match self {
            CommandError::Empty => "error: empty command",
            CommandError::Unknown => "error: unknown command (try 'help')",
            CommandError::MissingArgument => "error: missing argument",
            CommandError::UnexpectedArgument => "error: unexpected argument",
            CommandError::InvalidNumber => "error: bad number",
            CommandError::InvalidMode => "error: mode is 'timer' or 'thermostat'",
            CommandError::LineTooLong => "error: line too long",
            CommandError::Config(ConfigError::OutOfRange(_)) => "error: value out of range",
            CommandError::Config(ConfigError::InvertedTempPair) => {
                "error: stop temp must be below resume temp"
            }
            CommandError::Config(ConfigError::VersionMismatch(_)) => "error: bad settings record",
            CommandError::Config(ConfigError::Store(_)) => "error: settings not saved",
        }
    }
}

/// Help text, one entry per line
pub const HELP: &[&str] = &[
    "mode [timer|thermostat]   show or set mode",
    "temp <C>                  thermostat target",
    "frost time <s>            freeze duration",
    "frost temp <stop> <resume> timer cutoff",
    "wait time <s>             rest duration",
    "status                    show state",
    "help                      this text",
];

/// Parse one command line
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_ascii_whitespace();
    let keyword = words.next().ok_or(CommandError::Empty)?;

    let command = if is(keyword, "mode") {
        match words.next() {
            None => Command::Mode(None),
            Some(w) if is(w, "timer") => Command::Mode(Some(OperatingMode::Timer)),
            Some(w) if is(w, "thermostat") => Command::Mode(Some(OperatingMode::Thermostat)),
            Some(_) => return Err(CommandError::InvalidMode),
        }
    } else if is(keyword, "temp") {
        Command::Temp(parse_temp_x10(arg(&mut words)?)?)
    } else if is(keyword, "frost") {
        let sub = arg(&mut words)?;
        if is(sub, "time") {
            Command::FrostTime(parse_seconds(arg(&mut words)?)?)
        } else if is(sub, "temp") {
            let stop_x10 = parse_temp_x10(arg(&mut words)?)?;
            let resume_x10 = parse_temp_x10(arg(&mut words)?)?;
            Command::FrostTemp {
                stop_x10,
                resume_x10,
            }
        } else {
            return Err(CommandError::Unknown);
        }
    } else if is(keyword, "wait") {
        let sub = arg(&mut words)?;
        if !is(sub, "time") {
            return Err(CommandError::Unknown);
        }
        Command::WaitTime(parse_seconds(arg(&mut words)?)?)
    } else if is(keyword, "status") {
        Command::Status
    } else if is(keyword, "help") {
        Command::Help
    } else {
        return Err(CommandError::Unknown);
    };

    match words.next() {
        Some(_) => Err(CommandError::UnexpectedArgument),
        None => Ok(command),
    }
}

fn is(word: &str, keyword: &str) -> bool {
    word.eq_ignore_ascii_case(keyword)
}

fn arg<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<&'a str, CommandError> {
    words.next().ok_or(CommandError::MissingArgument)
}

/// Parse `[+-]digits[.digit]` into tenths of a degree
pub fn parse_temp_x10(text: &str) -> Result<i16, CommandError> {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (whole, frac) = match rest.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (rest, ""),
    };
    if whole.is_empty() || frac.len() > 1 || (rest.contains('.') && frac.is_empty()) {
        return Err(CommandError::InvalidNumber);
    }

    let whole = parse_digits(whole)?;
    let tenths = if frac.is_empty() { 0 } else { parse_digits(frac)? };

    let magnitude = whole
        .checked_mul(10)
        .and_then(|v| v.checked_add(tenths))
        .ok_or(CommandError::InvalidNumber)?;
    let value = if negative {
        -(magnitude as i64)
    } else {
        magnitude as i64
    };
    i16::try_from(value).map_err(|_| CommandError::InvalidNumber)
}

/// Parse a plain decimal number of seconds
pub fn parse_seconds(text: &str) -> Result<u32, CommandError> {
    parse_digits(text)
}

fn parse_digits(text: &str) -> Result<u32, CommandError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CommandError::InvalidNumber);
    }
    text.parse().map_err(|_| CommandError::InvalidNumber)
}
