//! Screen rendering
//!
//! Builds the two 16-character lines for the current UI state. Rendering
//! is pure; the caller decides whether the frame needs writing.

use core::fmt::Write;

use heapless::String;

use crate::config::{Field, OperatingMode};
use crate::control::Phase;
use crate::device::Status;
use crate::traits::DISPLAY_COLS;
use crate::ui::{MenuItem, UiState};

/// One line of display text
pub type Line = String<DISPLAY_COLS>;

/// Both display lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub top: Line,
    pub bottom: Line,
}

impl Frame {
    /// Render the frame for `ui` over the device status
    pub fn render(status: &Status, ui: UiState) -> Self {
        let mut frame = Frame::default();
        match ui {
            UiState::Idle => match status.mode {
                OperatingMode::Timer => frame.render_timer(status),
                OperatingMode::Thermostat => frame.render_thermostat(status),
            },
            UiState::MenuSelect { index } => {
                let item = MenuItem::from_index(index);
                let mut position: String<8> = String::new();
                let _ = write!(position, "{}/{}", item.index() + 1, MenuItem::COUNT);
                let _ = write!(frame.top, "{:<12}{:>4}", "Menu", position.as_str());
                let _ = write!(frame.bottom, "> {:<14}", item.label());
            }
            UiState::EditValue { field, draft } => {
                let value = format_field(field, draft);
                let _ = write!(frame.top, "{:<16}", field.label());
                let _ = write!(frame.bottom, "  {:<14}", value.as_str());
            }
        }
        frame
    }

    fn render_timer(&mut self, status: &Status) {
        let remaining = format_duration(status.remaining_s);
        let _ = write!(
            self.top,
            "{:<7}{:>8}{}",
            phase_label(status.phase),
            remaining.as_str(),
            engaged_marker(status.relay_engaged)
        );

        let temp = format_temp(status.temp_x10);
        let _ = write!(
            self.bottom,
            "{:<7}{:<6}{:>3}",
            temp.as_str(),
            if status.paused { "PAUSE" } else { "" },
            door_marker(status.door_open)
        );
    }

    fn render_thermostat(&mut self, status: &Status) {
        let target = format_temp(Some(status.target_x10));
        let _ = write!(
            self.top,
            "{:<8}{:>7}{}",
            "Thermo",
            target.as_str(),
            engaged_marker(status.relay_engaged)
        );

        let temp = format_temp(status.temp_x10);
        let _ = write!(
            self.bottom,
            "{:<7}{:<6}{:>3}",
            temp.as_str(),
            if status.demand { "COOL" } else { "IDLE" },
            door_marker(status.door_open)
        );
    }
}

fn phase_label(phase: Phase) -> &'static str {
    phase.label()
}

fn engaged_marker(engaged: bool) -> char {
    if engaged {
        '*'
    } else {
        ' '
    }
}

fn door_marker(open: bool) -> &'static str {
    if open {
        "D"
    } else {
        ""
    }
}

/// Format a temperature as `-18.5C`, or `--.-C` when unavailable
pub fn format_temp(temp_x10: Option<i16>) -> String<8> {
    let mut out = String::new();
    match temp_x10 {
        None => {
            let _ = out.push_str("--.-C");
        }
        Some(t) => {
            let t = t as i32;
            let sign = if t < 0 { "-" } else { "" };
            let abs = t.abs();
            let _ = write!(out, "{}{}.{}C", sign, abs / 10, abs % 10);
        }
    }
    out
}

/// Format a duration as `mm:ss`, or `hh:mmh` from one hour up
pub fn format_duration(seconds: u32) -> String<8> {
    let mut out = String::new();
    if seconds >= 3600 {
        let _ = write!(out, "{:02}:{:02}h", seconds / 3600, (seconds % 3600) / 60);
    } else {
        let _ = write!(out, "{:02}:{:02}", seconds / 60, seconds % 60);
    }
    out
}

/// Format a draft value for its field
pub fn format_field(field: Field, value: i32) -> String<16> {
    let mut out = String::new();
    match field {
        Field::Mode => {
            let label = OperatingMode::from_value(value)
                .map(OperatingMode::label)
                .unwrap_or("?");
            let _ = out.push_str(label);
        }
        Field::ThermostatTarget | Field::StopTemp | Field::ResumeTemp => {
            let temp = i16::try_from(value).ok();
            let _ = out.push_str(&format_temp(temp));
        }
        Field::FreezeDuration | Field::RestDuration => {
            let _ = out.push_str(&format_duration(value.max(0) as u32));
        }
    }
    out
}
