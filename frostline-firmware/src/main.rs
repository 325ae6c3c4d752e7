//! Frostline - Appliance Relay Controller Firmware
//!
//! Main firmware binary for RP2040-based freezer and cooler controllers.
//! A single compressor relay follows either a freeze/rest duty-cycle timer
//! or a hysteresis thermostat. Settings are edited from a rotary-encoder
//! menu on a 16x2 LCD or over the serial console.
//!
//! There is no executor: SysTick raises tick flags and the main loop
//! dispatches them in a single thread.

#![no_std]
#![no_main]

use defmt::*;
use {defmt_rtt as _, panic_probe as _};

use frostline_core::config::{Configuration, LoadSource};
use frostline_core::traits::SensorError;
use frostline_core::{Device, Dispatcher, PassReport, TickPeriods};
use frostline_hal_rp2040::flash::Rp2040FlashStorage;

use crate::storage::FlashConfigStore;

mod board;
mod storage;
mod tick;

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("Frostline firmware starting...");

    let p = embassy_rp::init(Default::default());
    let core = unwrap!(cortex_m::Peripherals::take());
    info!("Peripherals initialized");

    // Relay is forced off inside wire() before the slow init steps below
    let (mut board, spare) = board::wire(p);

    let store = FlashConfigStore::new(Rp2040FlashStorage::new(spare.flash, spare.dma));
    let (config, report) = Configuration::load(store);
    match report.source {
        LoadSource::Stored => info!("Loaded configuration from flash"),
        source => warn!("Using default configuration: {}", source),
    }
    if let Some(Err(e)) = report.persisted {
        warn!("Failed to persist default configuration: {}", e);
    }
    info!("Configuration: {}", config.get());

    if let Err(e) = board.display.init() {
        warn!("LCD init failed: {}", e);
    }
    if let Err(e) = board.probe.configure() {
        warn!("DS18B20 configure failed: {}", e);
    }

    let device = Device::new(config, TickPeriods::DEFAULT);
    let mut dispatcher = Dispatcher::new(&tick::TICK_FLAGS, device, board);

    tick::TICK_FLAGS.kickstart();
    tick::start(core.SYST, embassy_rp::clocks::clk_sys_freq());
    info!("Tick source running, entering main loop");

    let mut last_reading = None;
    loop {
        let report = dispatcher.poll();
        log_pass(&report, &mut last_reading);
        if report.handled.is_empty() && report.command.is_none() {
            cortex_m::asm::wfi();
        }
    }
}

/// Log what changed during one pass
///
/// Probe results are only logged when they differ from the previous one.
fn log_pass(report: &PassReport, last_reading: &mut Option<Result<i16, SensorError>>) {
    if let Some(engaged) = report.relay_changed {
        info!("Relay {}", if engaged { "on" } else { "off" });
    }
    if let Some(phase) = report.phase_changed {
        info!("Timer phase: {}", phase);
    }
    if let Some(reading) = report.reading {
        if *last_reading != Some(reading) {
            match reading {
                Ok(x10) => debug!("Temperature: {} x0.1C", x10),
                Err(e) => warn!("Probe error: {}", e),
            }
            *last_reading = Some(reading);
        }
    }
    if let Some(e) = report.display_error {
        warn!("Display write failed: {}", e);
    }
    match report.config_changed {
        Some(Ok(field)) => info!("Menu changed {}", field),
        Some(Err(e)) => warn!("Menu change rejected: {}", e),
        None => {}
    }
    if let Some(outcome) = report.command {
        match outcome.command {
            Ok(command) => debug!(
                "Console command {} (config changed: {})",
                command, outcome.config_changed
            ),
            Err(e) => debug!("Console command rejected: {}", e),
        }
    }
}
