//! Relay control policy
//!
//! Decides the relay state from the active mode and applies it to the
//! output only when it changes.
//!
//! ```text
//! Timer mode:       phase.relay_engaged && !cutoff.paused
//! Thermostat mode:  latch(temp, target ± hysteresis)
//! ```

pub mod thermostat;
pub mod timer;

pub use thermostat::{ThermostatLatch, THERMOSTAT_HYSTERESIS_X10};
pub use timer::{Phase, PhaseSpec, PhaseTable, TimerRuntime};

use crate::config::{DeviceConfig, OperatingMode};
use crate::safety::SafetyCutoff;
use crate::traits::RelayOutput;

/// Relay policy state
pub struct RelayController {
    config: DeviceConfig,
    table: PhaseTable,
    timer: TimerRuntime,
    thermostat: ThermostatLatch,
    cutoff: SafetyCutoff,
    /// Last state written to the output
    actual: bool,
}

impl RelayController {
    /// Create a controller with the relay assumed off
    pub fn new(config: &DeviceConfig) -> Self {
        Self {
            config: *config,
            table: PhaseTable::from_config(config),
            timer: TimerRuntime::new(),
            thermostat: ThermostatLatch::new(),
            cutoff: SafetyCutoff::new(),
            actual: false,
        }
    }

    /// Take over a changed configuration
    ///
    /// A mode change restarts the timer and clears both latches. The
    /// thermostat latch is then re-evaluated against `temp_x10` so the
    /// next [`drive`](Self::drive) reflects the new target.
    pub fn apply_config(&mut self, config: &DeviceConfig, temp_x10: Option<i16>) {
        if config.mode != self.config.mode {
            self.timer.restart();
            self.cutoff.release();
            self.thermostat.reset();
        }
        self.config = *config;
        self.table.sync(config);
        self.on_thermostat_tick(temp_x10);
    }

    /// Count one elapsed second (timer mode)
    ///
    /// Returns the new phase on a transition.
    pub fn on_second(&mut self) -> Option<Phase> {
        if self.config.mode != OperatingMode::Timer {
            return None;
        }
        self.timer.on_second(&self.table)
    }

    /// Re-evaluate the thermostat latch (thermostat mode)
    pub fn on_thermostat_tick(&mut self, temp_x10: Option<i16>) {
        if self.config.mode == OperatingMode::Thermostat {
            self.thermostat
                .update(temp_x10, self.config.thermostat_target_x10);
        }
    }

    /// Desired relay state for the current mode
    ///
    /// In timer mode this also updates the safety cutoff.
    pub fn desired(&mut self, temp_x10: Option<i16>) -> bool {
        match self.config.mode {
            OperatingMode::Timer => {
                let paused = self.cutoff.update(
                    temp_x10,
                    self.config.timer_stop_temp_x10,
                    self.config.timer_resume_temp_x10,
                );
                self.table.get(self.timer.phase()).relay_engaged && !paused
            }
            OperatingMode::Thermostat => self.thermostat.demand(),
        }
    }

    /// Evaluate and apply the relay state
    ///
    /// Writes the output only on change. Returns the new state if it was
    /// written.
    pub fn drive<R: RelayOutput>(&mut self, relay: &mut R, temp_x10: Option<i16>) -> Option<bool> {
        let desired = self.desired(temp_x10);
        if desired == self.actual {
            return None;
        }
        relay.set_engaged(desired);
        self.actual = desired;
        Some(desired)
    }

    pub fn mode(&self) -> OperatingMode {
        self.config.mode
    }

    pub fn phase(&self) -> Phase {
        self.timer.phase()
    }

    pub fn elapsed_s(&self) -> u32 {
        self.timer.elapsed_s()
    }

    pub fn remaining_s(&self) -> u32 {
        self.timer.remaining_s(&self.table)
    }

    pub fn is_paused(&self) -> bool {
        self.cutoff.is_paused()
    }

    pub fn demand(&self) -> bool {
        self.thermostat.demand()
    }

    /// Last state written to the relay
    pub fn engaged(&self) -> bool {
        self.actual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockRelay;
    use proptest::prelude::*;

    fn timer_config(freeze: u32, rest: u32) -> DeviceConfig {
        DeviceConfig {
            freeze_duration_s: freeze,
            rest_duration_s: rest,
            ..DeviceConfig::default()
        }
    }

    #[test]
    fn test_writes_only_on_change() {
        let mut relay = MockRelay::default();
        let mut ctl = RelayController::new(&timer_config(60, 60));

        assert_eq!(ctl.drive(&mut relay, Some(0)), Some(true));
        assert_eq!(ctl.drive(&mut relay, Some(0)), None);
        assert_eq!(ctl.drive(&mut relay, Some(0)), None);
        assert_eq!(relay.writes, 1);
        assert!(relay.engaged);
    }

    #[test]
    fn test_five_second_freeze_then_rest() {
        let mut relay = MockRelay::default();
        let mut ctl = RelayController::new(&timer_config(5, 5));
        ctl.drive(&mut relay, None);
        assert!(relay.engaged);

        let mut transition = None;
        for _ in 0..5 {
            if let Some(p) = ctl.on_second() {
                transition = Some(p);
            }
        }
        assert_eq!(transition, Some(Phase::Rest));
        assert_eq!(ctl.elapsed_s(), 0);
        assert_eq!(ctl.drive(&mut relay, None), Some(false));
        assert!(!relay.engaged);
    }

    #[test]
    fn test_cutoff_holds_across_phases() {
        let mut relay = MockRelay::default();
        let mut ctl = RelayController::new(&timer_config(5, 5));

        assert_eq!(ctl.drive(&mut relay, Some(-270)), None);
        assert!(ctl.is_paused());

        // Rest, then Freeze again, still too cold to resume
        for _ in 0..10 {
            ctl.on_second();
            ctl.drive(&mut relay, Some(-220));
            assert!(!relay.engaged);
        }
        assert_eq!(ctl.phase(), Phase::Freeze);

        assert_eq!(ctl.drive(&mut relay, Some(-200)), Some(true));
        assert!(!ctl.is_paused());
    }

    #[test]
    fn test_sensor_loss_disables_cutoff() {
        let mut relay = MockRelay::default();
        let mut ctl = RelayController::new(&timer_config(60, 60));
        ctl.drive(&mut relay, Some(-300));
        assert!(!relay.engaged);
        assert_eq!(ctl.drive(&mut relay, None), Some(true));
    }

    #[test]
    fn test_thermostat_mode() {
        let config = DeviceConfig {
            mode: OperatingMode::Thermostat,
            thermostat_target_x10: -120,
            ..DeviceConfig::default()
        };
        let mut relay = MockRelay::default();
        let mut ctl = RelayController::new(&config);

        ctl.on_thermostat_tick(Some(-110));
        assert_eq!(ctl.drive(&mut relay, Some(-110)), Some(true));
        ctl.on_thermostat_tick(Some(-125));
        assert_eq!(ctl.drive(&mut relay, Some(-125)), None);
        ctl.on_thermostat_tick(Some(-130));
        assert_eq!(ctl.drive(&mut relay, Some(-130)), Some(false));

        // Timer does not run in thermostat mode
        assert_eq!(ctl.on_second(), None);
        assert_eq!(ctl.elapsed_s(), 0);
    }

    #[test]
    fn test_thermostat_sensor_loss_fails_off() {
        let config = DeviceConfig {
            mode: OperatingMode::Thermostat,
            ..DeviceConfig::default()
        };
        let mut relay = MockRelay::default();
        let mut ctl = RelayController::new(&config);
        ctl.on_thermostat_tick(Some(100));
        ctl.drive(&mut relay, Some(100));
        assert!(relay.engaged);

        ctl.on_thermostat_tick(None);
        assert_eq!(ctl.drive(&mut relay, None), Some(false));
    }

    #[test]
    fn test_mode_switch_resets_runtime() {
        let mut relay = MockRelay::default();
        let mut config = timer_config(5, 5);
        let mut ctl = RelayController::new(&config);
        for _ in 0..7 {
            ctl.on_second();
        }
        ctl.drive(&mut relay, Some(-300));
        assert_eq!(ctl.phase(), Phase::Rest);
        assert!(ctl.is_paused());

        config.mode = OperatingMode::Thermostat;
        ctl.apply_config(&config, None);
        config.mode = OperatingMode::Timer;
        ctl.apply_config(&config, None);

        assert_eq!(ctl.phase(), Phase::Freeze);
        assert_eq!(ctl.elapsed_s(), 0);
        assert!(!ctl.is_paused());
        assert_eq!(ctl.drive(&mut relay, None), Some(true));
    }

    #[test]
    fn test_target_change_applies_immediately() {
        let mut config = DeviceConfig {
            mode: OperatingMode::Thermostat,
            thermostat_target_x10: -180,
            ..DeviceConfig::default()
        };
        let mut relay = MockRelay::default();
        let mut ctl = RelayController::new(&config);
        ctl.on_thermostat_tick(Some(-150));
        assert_eq!(ctl.drive(&mut relay, Some(-150)), Some(true));

        config.thermostat_target_x10 = -10;
        ctl.apply_config(&config, Some(-150));
        assert!(!ctl.demand());
        assert_eq!(ctl.drive(&mut relay, Some(-150)), Some(false));
    }

    #[test]
    fn test_switch_to_thermostat_keeps_relay_on_when_warm() {
        let mut config = timer_config(60, 60);
        let mut relay = MockRelay::default();
        let mut ctl = RelayController::new(&config);
        assert_eq!(ctl.drive(&mut relay, Some(50)), Some(true));

        config.mode = OperatingMode::Thermostat;
        ctl.apply_config(&config, Some(50));
        assert_eq!(ctl.drive(&mut relay, Some(50)), None);
        assert!(relay.engaged);
        assert_eq!(relay.writes, 1);
    }

    #[test]
    fn test_duration_change_keeps_phase() {
        let mut config = timer_config(60, 60);
        let mut ctl = RelayController::new(&config);
        for _ in 0..10 {
            ctl.on_second();
        }
        config.freeze_duration_s = 120;
        ctl.apply_config(&config, None);
        assert_eq!(ctl.elapsed_s(), 10);
        assert_eq!(ctl.remaining_s(), 110);
    }

    proptest! {
        #[test]
        fn prop_relay_off_while_paused(
            temps in prop::collection::vec(-400i16..100, 1..80),
        ) {
            let config = timer_config(5, 5);
            let mut relay = MockRelay::default();
            let mut ctl = RelayController::new(&config);
            for t in temps {
                ctl.on_second();
                ctl.drive(&mut relay, Some(t));
                if ctl.is_paused() {
                    prop_assert!(!relay.engaged);
                } else {
                    prop_assert_eq!(relay.engaged, ctl.phase() == Phase::Freeze);
                }
            }
        }
    }
}
