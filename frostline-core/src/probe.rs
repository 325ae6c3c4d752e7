//! Temperature acquisition cycle
//!
//! The probe needs a fixed interval between starting a conversion and
//! reading its result. Instead of waiting, each temperature tick either
//! starts a conversion or counts time until the result is due.

use crate::traits::{SensorError, TemperatureProbe};

/// Conversion time of a 12-bit DS18B20
pub const PROBE_CONVERSION_MS: u32 = 750;

/// Conversion bookkeeping and the last good reading
#[derive(Debug, Clone, Default)]
pub struct ProbeCycle {
    pending: bool,
    waited_ms: u32,
    reading: Option<i16>,
    /// A read or a failed request has produced an outcome
    settled: bool,
}

impl ProbeCycle {
    pub const fn new() -> Self {
        Self {
            pending: false,
            waited_ms: 0,
            reading: None,
            settled: false,
        }
    }

    /// Advance the cycle by one temperature tick of `tick_ms`
    ///
    /// Returns the outcome when a result was read or a request failed.
    pub fn poll<P: TemperatureProbe>(
        &mut self,
        probe: &mut P,
        tick_ms: u32,
    ) -> Option<Result<i16, SensorError>> {
        if !self.pending {
            let outcome = self.start(probe).err().map(Err);
            self.settled |= outcome.is_some();
            return outcome;
        }

        self.waited_ms = self.waited_ms.saturating_add(tick_ms);
        if self.waited_ms < PROBE_CONVERSION_MS {
            return None;
        }

        self.pending = false;
        self.settled = true;
        let outcome = probe.read_last_result_x10();
        self.reading = outcome.ok();

        match self.start(probe) {
            Err(e) if outcome.is_ok() => Some(Err(e)),
            _ => Some(outcome),
        }
    }

    fn start<P: TemperatureProbe>(&mut self, probe: &mut P) -> Result<(), SensorError> {
        self.waited_ms = 0;
        match probe.request_conversion() {
            Ok(()) => {
                self.pending = true;
                Ok(())
            }
            Err(e) => {
                self.reading = None;
                Err(e)
            }
        }
    }

    /// Last good reading, `None` while the probe is unavailable
    pub fn reading(&self) -> Option<i16> {
        self.reading
    }

    /// Whether `reading` reflects the probe yet
    ///
    /// False from power-up until the first conversion was read or a
    /// request failed.
    pub fn settled(&self) -> bool {
        self.settled
    }
}
