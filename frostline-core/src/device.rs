//! Device state aggregate
//!
//! All mutable state of the controller lives here and is only touched from
//! the main loop. Each handler takes the collaborator it needs, so the
//! aggregate itself owns no hardware.

use core::fmt::Write;

use heapless::String;

use crate::config::{ConfigError, Configuration, DeviceConfig, Field, OperatingMode};
use crate::console::{parse, Command, CommandError, LineBuffer, HELP};
use crate::control::{Phase, RelayController};
use crate::input::EncoderDebouncer;
use crate::probe::ProbeCycle;
use crate::screen::{format_temp, Frame};
use crate::tick::{Tick, TickPeriods};
use crate::traits::{
    CharDisplay, ConfigStore, Console, DisplayError, DoorSensor, EncoderInputs, RelayOutput, SensorError,
    TemperatureProbe,
};
use crate::ui::{UiMachine, UiState};

/// Received bytes handled per pass
pub const CONSOLE_BYTES_PER_PASS: usize = 64;

/// Snapshot of the controller for display and `status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    pub mode: OperatingMode,
    pub relay_engaged: bool,
    pub temp_x10: Option<i16>,
    pub door_open: bool,
    pub phase: Phase,
    pub elapsed_s: u32,
    pub remaining_s: u32,
    pub paused: bool,
    pub target_x10: i16,
    pub demand: bool,
}

/// Result of one console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandOutcome {
    pub command: Result<Command, CommandError>,
    /// The configuration was changed and persisted
    pub config_changed: bool,
}

/// Controller state
pub struct Device<S: ConfigStore> {
    config: Configuration<S>,
    relay: RelayController,
    encoder: EncoderDebouncer,
    ui: UiMachine,
    probe: ProbeCycle,
    door_open: bool,
    periods: TickPeriods,
    last_frame: Option<Frame>,
    line: LineBuffer,
}

impl<S: ConfigStore> Device<S> {
    pub fn new(config: Configuration<S>, periods: TickPeriods) -> Self {
        let relay = RelayController::new(config.get());
        Self {
            config,
            relay,
            encoder: EncoderDebouncer::new(),
            ui: UiMachine::new(),
            probe: ProbeCycle::new(),
            door_open: false,
            periods,
            last_frame: None,
            line: LineBuffer::new(),
        }
    }

    pub fn sample_door<D: DoorSensor>(&mut self, door: &mut D) {
        self.door_open = door.is_open();
    }

    pub fn poll_temperature<P: TemperatureProbe>(
        &mut self,
        probe: &mut P,
    ) -> Option<Result<i16, SensorError>> {
        self.probe
            .poll(probe, self.periods.period_ms(Tick::Temperature))
    }

    /// Count one elapsed second and apply the resulting relay state
    pub fn on_second<R: RelayOutput>(&mut self, relay: &mut R) -> (Option<Phase>, Option<bool>) {
        let phase = self.relay.on_second();
        (phase, self.drive_relay(relay))
    }

    /// Re-evaluate the thermostat and apply the resulting relay state
    pub fn on_thermostat_tick<R: RelayOutput>(&mut self, relay: &mut R) -> Option<bool> {
        self.relay.on_thermostat_tick(self.probe.reading());
        self.drive_relay(relay)
    }

    /// Evaluate the relay policy and write the output if it changed
    ///
    /// In timer mode the relay is left alone until the first probe outcome
    /// is known, so the cutoff is not bypassed at power-up.
    pub fn drive_relay<R: RelayOutput>(&mut self, relay: &mut R) -> Option<bool> {
        if self.relay.mode() == OperatingMode::Timer && !self.probe.settled() {
            return None;
        }
        self.relay.drive(relay, self.probe.reading())
    }

    pub fn sample_encoder<E: EncoderInputs>(&mut self, encoder: &mut E) {
        self.encoder.sample(encoder.sample());
    }

    /// Advance the menu timeout and redraw if the frame changed
    ///
    /// Returns whether the display was written. A failed write is retried
    /// on the next refresh.
    pub fn refresh_display<L: CharDisplay>(&mut self, display: &mut L) -> Result<bool, DisplayError> {
        self.ui
            .on_display_tick(self.periods.period_ms(Tick::Display), self.config.get());

        let frame = Frame::render(&self.status(), self.ui.state());
        if self.last_frame.as_ref() == Some(&frame) {
            return Ok(false);
        }

        display.write_lines(&frame.top, &frame.bottom)?;
        self.last_frame = Some(frame);
        Ok(true)
    }

    /// Feed pending encoder input to the menu
    ///
    /// Returns the outcome of a committed draft.
    pub fn process_ui(&mut self) -> Option<Result<Field, ConfigError>> {
        let delta = self.encoder.consume_delta();
        let click = self.encoder.consume_click();
        let commit = self.ui.process_input(delta, click, self.config.get())?;
        Some(self.commit_field(commit.field, commit.value).map(|_| commit.field))
    }

    /// Set one field through the validating setter
    ///
    /// Returns whether the configuration changed.
    pub fn commit_field(&mut self, field: Field, value: i32) -> Result<bool, ConfigError> {
        let changed = self.config.set_field(field, value)?;
        self.after_change(changed);
        Ok(changed)
    }

    /// Set the timer cutoff pair through the validating setter
    pub fn commit_timer_temps(&mut self, stop_x10: i16, resume_x10: i16) -> Result<bool, ConfigError> {
        let changed = self.config.set_timer_temps(stop_x10, resume_x10)?;
        self.after_change(changed);
        Ok(changed)
    }

    fn after_change(&mut self, changed: bool) {
        if changed {
            self.relay
                .apply_config(self.config.get(), self.probe.reading());
        }
    }

    /// Read console input and run at most one command
    pub fn poll_console<C: Console>(&mut self, console: &mut C) -> Option<CommandOutcome> {
        for _ in 0..CONSOLE_BYTES_PER_PASS {
            let byte = console.read_byte()?;
            let line = match self.line.push(byte) {
                Ok(Some(line)) => line,
                Ok(None) => continue,
                Err(e) => {
                    let error = CommandError::from(e);
                    console.write_line(error.message());
                    return Some(CommandOutcome {
                        command: Err(error),
                        config_changed: false,
                    });
                }
            };

            let outcome = match parse(&line) {
                Ok(command) => match self.execute(command, console) {
                    Ok(changed) => CommandOutcome {
                        command: Ok(command),
                        config_changed: changed,
                    },
                    Err(e) => CommandOutcome {
                        command: Err(e),
                        config_changed: false,
                    },
                },
                Err(e) => CommandOutcome {
                    command: Err(e),
                    config_changed: false,
                },
            };
            if let Err(e) = outcome.command {
                console.write_line(e.message());
            }
            return Some(outcome);
        }
        None
    }

    /// Run a parsed command
    ///
    /// Returns whether the configuration changed. On error nothing is
    /// changed and the caller prints the diagnostic.
    pub fn execute<C: Console>(&mut self, command: Command, console: &mut C) -> Result<bool, CommandError> {
        let changed = match command {
            Command::Mode(None) => {
                let mut line: String<32> = String::new();
                let _ = write!(line, "mode: {}", mode_name(self.config.get().mode));
                console.write_line(&line);
                return Ok(false);
            }
            Command::Mode(Some(mode)) => self.commit_field(Field::Mode, mode.as_value())?,
            Command::Temp(t) => self.commit_field(Field::ThermostatTarget, t as i32)?,
            Command::FrostTime(s) => self.commit_field(Field::FreezeDuration, seconds(s))?,
            Command::WaitTime(s) => self.commit_field(Field::RestDuration, seconds(s))?,
            Command::FrostTemp {
                stop_x10,
                resume_x10,
            } => self.commit_timer_temps(stop_x10, resume_x10)?,
            Command::Status => {
                self.write_status(console);
                return Ok(false);
            }
            Command::Help => {
                for line in HELP {
                    console.write_line(line);
                }
                return Ok(false);
            }
        };
        console.write_line("ok");
        Ok(changed)
    }

    fn write_status<C: Console>(&self, console: &mut C) {
        let status = self.status();
        let mut line: String<48> = String::new();

        let _ = write!(line, "mode: {}", mode_name(status.mode));
        console.write_line(&line);

        line.clear();
        let _ = write!(line, "relay: {}", if status.relay_engaged { "on" } else { "off" });
        console.write_line(&line);

        line.clear();
        let _ = write!(line, "temp: {}", format_temp(status.temp_x10).as_str());
        console.write_line(&line);

        line.clear();
        match status.mode {
            OperatingMode::Timer => {
                let _ = write!(
                    line,
                    "phase: {} {}s/{}s{}",
                    status.phase.label(),
                    status.elapsed_s,
                    status.elapsed_s + status.remaining_s,
                    if status.paused { " (paused)" } else { "" }
                );
            }
            OperatingMode::Thermostat => {
                let _ = write!(
                    line,
                    "target: {} demand: {}",
                    format_temp(Some(status.target_x10)).as_str(),
                    if status.demand { "on" } else { "off" }
                );
            }
        }
        console.write_line(&line);

        console.write_line(if status.door_open {
            "door: open"
        } else {
            "door: closed"
        });
    }

    pub fn status(&self) -> Status {
        let config = self.config.get();
        Status {
            mode: config.mode,
            relay_engaged: self.relay.engaged(),
            temp_x10: self.probe.reading(),
            door_open: self.door_open,
            phase: self.relay.phase(),
            elapsed_s: self.relay.elapsed_s(),
            remaining_s: self.relay.remaining_s(),
            paused: self.relay.is_paused(),
            target_x10: config.thermostat_target_x10,
            demand: self.relay.demand(),
        }
    }

    pub fn mode(&self) -> OperatingMode {
        self.config.get().mode
    }

    pub fn config(&self) -> &DeviceConfig {
        self.config.get()
    }

    pub fn configuration(&self) -> &Configuration<S> {
        &self.config
    }

    pub fn ui_state(&self) -> UiState {
        self.ui.state()
    }
}

fn mode_name(mode: OperatingMode) -> &'static str {
    match mode {
        OperatingMode::Timer => "timer",
        OperatingMode::Thermostat => "thermostat",
    }
}

fn seconds(s: u32) -> i32 {
    i32::try_from(s).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStore, MockConsole, MockDisplay, MockDoor, MockEncoder, MockProbe, MockRelay};

    fn device() -> Device<MemoryStore> {
        let (config, _) = Configuration::load(MemoryStore::with_config(&DeviceConfig::default()));
        Device::new(config, TickPeriods::DEFAULT)
    }

    fn acquire(device: &mut Device<MemoryStore>, probe: &mut MockProbe) {
        for _ in 0..4 {
            device.poll_temperature(probe);
        }
    }

    #[test]
    fn test_display_written_only_on_change() {
        let mut device = device();
        let mut display = MockDisplay::default();
        assert_eq!(device.refresh_display(&mut display), Ok(true));
        assert_eq!(device.refresh_display(&mut display), Ok(false));

        device.sample_door(&mut MockDoor { open: true });
        assert_eq!(device.refresh_display(&mut display), Ok(true));
        assert_eq!(display.lines.len(), 2);
        assert!(display.lines[1].1.ends_with('D'));
    }

    #[test]
    fn test_display_error_retried() {
        let mut device = device();
        let mut display = MockDisplay {
            fail: true,
            ..MockDisplay::default()
        };
        assert_eq!(device.refresh_display(&mut display), Err(DisplayError::Bus));
        display.fail = false;
        assert_eq!(device.refresh_display(&mut display), Ok(true));
    }

    #[test]
    fn test_menu_commit_persists_and_applies() {
        let mut device = device();
        let mut encoder = MockEncoder::default();
        encoder.push(false, false, false);
        device.sample_encoder(&mut encoder);

        // Open the menu, move to Freeze time, enter edit
        encoder.click();
        for _ in 0..6 {
            device.sample_encoder(&mut encoder);
        }
        assert_eq!(device.process_ui(), None);
        for _ in 0..2 {
            encoder.turn_cw();
            device.sample_encoder(&mut encoder);
            device.sample_encoder(&mut encoder);
        }
        encoder.click();
        for _ in 0..6 {
            device.sample_encoder(&mut encoder);
        }
        assert_eq!(device.process_ui(), None);
        assert!(matches!(device.ui_state(), UiState::EditValue { .. }));

        // One detent down, then confirm
        encoder.push(true, true, false);
        encoder.push(false, true, false);
        device.sample_encoder(&mut encoder);
        device.sample_encoder(&mut encoder);
        encoder.click();
        for _ in 0..6 {
            device.sample_encoder(&mut encoder);
        }
        assert_eq!(device.process_ui(), Some(Ok(Field::FreezeDuration)));
        assert_eq!(device.config().freeze_duration_s, 1_770);
        assert_eq!(
            device.configuration().store().stored().map(|c| c.freeze_duration_s),
            Some(1_770)
        );
        assert_eq!(device.status().remaining_s, 1_770);
    }

    #[test]
    fn test_console_sets_and_reports() {
        let mut device = device();
        let mut console = MockConsole::default();

        console.type_line("frost time 600");
        let outcome = device.poll_console(&mut console).unwrap();
        assert_eq!(outcome.command, Ok(Command::FrostTime(600)));
        assert!(outcome.config_changed);
        assert_eq!(console.take_output(), "ok\r\n");
        assert_eq!(device.config().freeze_duration_s, 600);

        console.type_line("mode");
        device.poll_console(&mut console);
        assert_eq!(console.take_output(), "mode: timer\r\n");
    }

    #[test]
    fn test_console_rejects_out_of_range() {
        let mut device = device();
        let mut console = MockConsole::default();

        console.type_line("temp 15");
        let outcome = device.poll_console(&mut console).unwrap();
        assert_eq!(
            outcome.command,
            Err(CommandError::Config(ConfigError::OutOfRange(Field::ThermostatTarget)))
        );
        assert!(!outcome.config_changed);
        assert_eq!(console.take_output(), "error: value out of range\r\n");
        assert_eq!(device.config().thermostat_target_x10, -180);

        console.type_line("frost temp -20 -26");
        device.poll_console(&mut console);
        assert_eq!(
            console.take_output(),
            "error: stop temp must be below resume temp\r\n"
        );
        assert_eq!(*device.config(), DeviceConfig::default());
    }

    #[test]
    fn test_console_malformed_text() {
        let mut device = device();
        let mut console = MockConsole::default();
        console.type_line("frobnicate");
        device.poll_console(&mut console);
        assert_eq!(console.take_output(), "error: unknown command (try 'help')\r\n");
        assert_eq!(device.configuration().store().saves, 0);
    }

    #[test]
    fn test_console_one_command_per_pass() {
        let mut device = device();
        let mut console = MockConsole::default();
        console.type_line("wait time 60");
        console.type_line("frost time 60");

        device.poll_console(&mut console);
        assert_eq!(device.config().rest_duration_s, 60);
        assert_eq!(device.config().freeze_duration_s, 1_800);
        device.poll_console(&mut console);
        assert_eq!(device.config().freeze_duration_s, 60);
        assert_eq!(device.poll_console(&mut console), None);
    }

    #[test]
    fn test_status_output() {
        let mut device = device();
        let mut probe = MockProbe::reading(-185);
        let mut relay = MockRelay::default();
        acquire(&mut device, &mut probe);
        device.on_second(&mut relay);

        let mut console = MockConsole::default();
        console.type_line("status");
        device.poll_console(&mut console);
        assert_eq!(
            console.take_output(),
            "mode: timer\r\nrelay: on\r\ntemp: -18.5C\r\nphase: Freeze 1s/1800s\r\ndoor: closed\r\n"
        );
    }

    fn click(device: &mut Device<MemoryStore>, encoder: &mut MockEncoder) {
        encoder.click();
        for _ in 0..6 {
            device.sample_encoder(encoder);
        }
    }

    fn turn(device: &mut Device<MemoryStore>, encoder: &mut MockEncoder, detents: usize) {
        for _ in 0..detents {
            encoder.turn_cw();
            device.sample_encoder(encoder);
            device.sample_encoder(encoder);
        }
    }

    #[test]
    fn test_menu_edit_clamps_at_cross_bound() {
        let mut device = device();
        let mut encoder = MockEncoder::default();
        encoder.push(false, false, false);
        device.sample_encoder(&mut encoder);

        click(&mut device, &mut encoder);
        assert_eq!(device.process_ui(), None);
        turn(&mut device, &mut encoder, 4);
        assert_eq!(device.process_ui(), None);
        click(&mut device, &mut encoder);
        assert_eq!(device.process_ui(), None);
        assert_eq!(
            device.ui_state(),
            UiState::EditValue {
                field: Field::StopTemp,
                draft: -260
            }
        );

        // Far past the resume temperature
        turn(&mut device, &mut encoder, 40);
        assert_eq!(device.process_ui(), None);
        click(&mut device, &mut encoder);
        assert_eq!(device.process_ui(), Some(Ok(Field::StopTemp)));

        assert_eq!(device.config().timer_stop_temp_x10, -205);
        assert_eq!(device.config().timer_resume_temp_x10, -200);
        let stored = device.configuration().store().stored();
        assert_eq!(stored.map(|c| c.timer_stop_temp_x10), Some(-205));
    }

    #[test]
    fn test_target_change_reevaluates_thermostat() {
        let config = DeviceConfig {
            mode: OperatingMode::Thermostat,
            ..DeviceConfig::default()
        };
        let (config, _) = Configuration::load(MemoryStore::with_config(&config));
        let mut device = Device::new(config, TickPeriods::DEFAULT);
        let mut probe = MockProbe::reading(-150);
        let mut relay = MockRelay::default();
        acquire(&mut device, &mut probe);
        assert_eq!(device.on_thermostat_tick(&mut relay), Some(true));

        let mut console = MockConsole::default();
        console.type_line("temp -10");
        let outcome = device.poll_console(&mut console).unwrap();
        assert!(outcome.config_changed);
        assert_eq!(device.drive_relay(&mut relay), Some(false));
        assert!(!relay.engaged);
    }

    #[test]
    fn test_timer_waits_for_first_probe_outcome() {
        let mut device = device();
        let mut probe = MockProbe::reading(-270);
        let mut relay = MockRelay::default();

        device.poll_temperature(&mut probe);
        assert_eq!(device.on_second(&mut relay), (None, None));
        assert_eq!(relay.writes, 0);

        for _ in 0..3 {
            device.poll_temperature(&mut probe);
        }
        assert_eq!(device.on_second(&mut relay), (None, None));
        assert!(device.status().paused);
        assert_eq!(relay.writes, 0);
    }

    #[test]
    fn test_missing_probe_settles_and_runs_timer() {
        let mut device = device();
        let mut probe = MockProbe::reading(0);
        probe.request_error = Some(SensorError::NotPresent);
        let mut relay = MockRelay::default();

        assert_eq!(device.poll_temperature(&mut probe), Some(Err(SensorError::NotPresent)));
        assert_eq!(device.on_second(&mut relay), (None, Some(true)));
    }

    #[test]
    fn test_mode_switch_from_console_resets_timer() {
        let mut device = device();
        let mut probe = MockProbe::reading(0);
        probe.request_error = Some(SensorError::NotPresent);
        device.poll_temperature(&mut probe);
        let mut relay = MockRelay::default();
        for _ in 0..10 {
            device.on_second(&mut relay);
        }
        assert_eq!(device.status().elapsed_s, 10);

        let mut console = MockConsole::default();
        console.type_line("mode thermostat");
        device.poll_console(&mut console);
        assert_eq!(device.mode(), OperatingMode::Thermostat);
        // Sensor unavailable: thermostat fails safe
        assert_eq!(device.on_thermostat_tick(&mut relay), Some(false));

        console.type_line("mode timer");
        device.poll_console(&mut console);
        assert_eq!(device.status().elapsed_s, 0);
        assert_eq!(device.status().phase, Phase::Freeze);
    }
}
