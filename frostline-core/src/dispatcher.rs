//! Cooperative activity dispatcher
//!
//! One [`Dispatcher::poll`] call is one main-loop pass:
//!
//! 1. drain every pending tick flag in a single critical section
//! 2. run the handler of each drained tick, in priority order, at most once
//! 3. check the serial console and feed encoder input to the menu
//!
//! Nothing here blocks. Ticks raised while a pass runs are picked up by
//! the next pass.

use crate::config::{ConfigError, Field, OperatingMode};
use crate::control::Phase;
use crate::device::{CommandOutcome, Device};
use crate::tick::{Tick, TickFlags, TickSet};
use crate::traits::{
    CharDisplay, ConfigStore, Console, DisplayError, DoorSensor, EncoderInputs, RelayOutput,
    SensorError, TemperatureProbe,
};

/// Hardware collaborators driven by the dispatcher
pub struct Board<R, P, D, E, L, C> {
    pub relay: R,
    pub probe: P,
    pub door: D,
    pub encoder: E,
    pub display: L,
    pub console: C,
}

/// What happened during one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PassReport {
    /// Ticks whose handler ran
    pub handled: TickSet,
    /// New relay state, if it was written
    pub relay_changed: Option<bool>,
    /// New timer phase, on a transition
    pub phase_changed: Option<Phase>,
    /// Probe result or request failure
    pub reading: Option<Result<i16, SensorError>>,
    pub display_error: Option<DisplayError>,
    /// Outcome of a menu commit
    pub config_changed: Option<Result<Field, ConfigError>>,
    pub command: Option<CommandOutcome>,
}

impl PassReport {
    fn relay(&mut self, changed: Option<bool>) {
        if changed.is_some() {
            self.relay_changed = changed;
        }
    }
}

/// Main-loop driver
pub struct Dispatcher<'f, S: ConfigStore, R, P, D, E, L, C> {
    flags: &'f TickFlags,
    device: Device<S>,
    board: Board<R, P, D, E, L, C>,
}

impl<'f, S, R, P, D, E, L, C> Dispatcher<'f, S, R, P, D, E, L, C>
where
    S: ConfigStore,
    R: RelayOutput,
    P: TemperatureProbe,
    D: DoorSensor,
    E: EncoderInputs,
    L: CharDisplay,
    C: Console,
{
    pub fn new(flags: &'f TickFlags, device: Device<S>, board: Board<R, P, D, E, L, C>) -> Self {
        Self {
            flags,
            device,
            board,
        }
    }

    /// Run one pass
    pub fn poll(&mut self) -> PassReport {
        let ticks = self.flags.drain();
        let mut report = PassReport::default();

        for tick in ticks.iter() {
            let mode = self.device.mode();
            match tick {
                Tick::Door => self.device.sample_door(&mut self.board.door),
                Tick::Temperature => {
                    report.reading = self.device.poll_temperature(&mut self.board.probe);
                }
                Tick::Second => {
                    if mode != OperatingMode::Timer {
                        continue;
                    }
                    let (phase, relay) = self.device.on_second(&mut self.board.relay);
                    report.phase_changed = phase;
                    report.relay(relay);
                }
                Tick::Thermostat => {
                    if mode != OperatingMode::Thermostat {
                        continue;
                    }
                    let relay = self.device.on_thermostat_tick(&mut self.board.relay);
                    report.relay(relay);
                }
                Tick::Encoder => self.device.sample_encoder(&mut self.board.encoder),
                Tick::Display => {
                    if let Err(e) = self.device.refresh_display(&mut self.board.display) {
                        report.display_error = Some(e);
                    }
                }
            }
            report.handled.insert(tick);
        }

        if let Some(outcome) = self.device.poll_console(&mut self.board.console) {
            if outcome.config_changed {
                let relay = self.device.drive_relay(&mut self.board.relay);
                report.relay(relay);
            }
            report.command = Some(outcome);
        }

        if let Some(result) = self.device.process_ui() {
            if result.is_ok() {
                let relay = self.device.drive_relay(&mut self.board.relay);
                report.relay(relay);
            }
            report.config_changed = Some(result);
        }

        report
    }

    pub fn device(&self) -> &Device<S> {
        &self.device
    }

    pub fn board(&self) -> &Board<R, P, D, E, L, C> {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board<R, P, D, E, L, C> {
        &mut self.board
    }
}
