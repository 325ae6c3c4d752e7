//! Thermostat hysteresis latch
//!
//! Bang-bang control around a target temperature. The latch turns cooling
//! on at the top of the band and off at the bottom, and holds in between.

/// Half-width of the hysteresis band (°C × 10)
pub const THERMOSTAT_HYSTERESIS_X10: i16 = 10;

/// Cooling-demand latch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThermostatLatch {
    cooling_demand: bool,
}

impl ThermostatLatch {
    pub const fn new() -> Self {
        Self {
            cooling_demand: false,
        }
    }

    /// Evaluate the latch against the live temperature
    ///
    /// An unavailable sensor forces the demand off.
    pub fn update(&mut self, temp_x10: Option<i16>, target_x10: i16) -> bool {
        let Some(temp) = temp_x10 else {
            self.cooling_demand = false;
            return false;
        };

        let temp = temp as i32;
        let target = target_x10 as i32;
        let h = THERMOSTAT_HYSTERESIS_X10 as i32;

        if temp >= target + h {
            self.cooling_demand = true;
        } else if temp <= target - h {
            self.cooling_demand = false;
        }

        self.cooling_demand
    }

    /// Clear the latch
    pub fn reset(&mut self) {
        self.cooling_demand = false;
    }

    pub fn demand(&self) -> bool {
        self.cooling_demand
    }
}
