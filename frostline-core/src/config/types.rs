//! Configuration type definitions
//!
//! The device configuration is a single versioned record. It is stored in
//! flash as postcard-serialized binary data, with the schema version as the
//! first byte so a stale layout is recognised before decoding.

use serde::{Deserialize, Serialize};

use crate::traits::StoreError;

/// Schema version written into every stored record
pub const CONFIG_SCHEMA_VERSION: u8 = 2;

/// Upper bound of an encoded record
pub const MAX_ENCODED_CONFIG_LEN: usize = 32;

/// Thermostat target bounds (°C × 10)
pub const TARGET_MIN_X10: i16 = -300;
pub const TARGET_MAX_X10: i16 = 100;

/// Freeze/rest phase duration bounds (seconds)
pub const DURATION_MIN_S: u32 = 5;
pub const DURATION_MAX_S: u32 = 43_200;

/// Timer safety cutoff temperature bounds (°C × 10)
pub const CUTOFF_TEMP_MIN_X10: i16 = -400;
pub const CUTOFF_TEMP_MAX_X10: i16 = 100;

/// Menu step for temperatures (0.5°C)
pub const TEMP_STEP_X10: i32 = 5;

/// Menu step for durations
pub const DURATION_STEP_S: i32 = 30;

/// Relay control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Fixed freeze/rest duty cycle
    #[default]
    Timer,
    /// Hysteresis band around a target temperature
    Thermostat,
}

impl OperatingMode {
    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            OperatingMode::Timer => "Timer",
            OperatingMode::Thermostat => "Thermostat",
        }
    }

    /// Numeric encoding used for menu drafts
    pub fn as_value(self) -> i32 {
        match self {
            OperatingMode::Timer => 0,
            OperatingMode::Thermostat => 1,
        }
    }

    /// Inverse of [`OperatingMode::as_value`]
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(OperatingMode::Timer),
            1 => Some(OperatingMode::Thermostat),
            _ => None,
        }
    }
}

/// Editable configuration fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Mode,
    ThermostatTarget,
    FreezeDuration,
    RestDuration,
    StopTemp,
    ResumeTemp,
}

impl Field {
    /// Display label (at most 14 characters)
    pub fn label(self) -> &'static str {
        match self {
            Field::Mode => "Mode",
            Field::ThermostatTarget => "Target temp",
            Field::FreezeDuration => "Freeze time",
            Field::RestDuration => "Rest time",
            Field::StopTemp => "Stop temp",
            Field::ResumeTemp => "Resume temp",
        }
    }

    /// Domain bounds, inclusive
    pub fn bounds(self) -> (i32, i32) {
        match self {
            Field::Mode => (0, 1),
            Field::ThermostatTarget => (TARGET_MIN_X10 as i32, TARGET_MAX_X10 as i32),
            Field::FreezeDuration | Field::RestDuration => {
                (DURATION_MIN_S as i32, DURATION_MAX_S as i32)
            }
            Field::StopTemp | Field::ResumeTemp => {
                (CUTOFF_TEMP_MIN_X10 as i32, CUTOFF_TEMP_MAX_X10 as i32)
            }
        }
    }

    /// Amount one encoder detent changes the value by
    pub fn step(self) -> i32 {
        match self {
            Field::Mode => 1,
            Field::ThermostatTarget | Field::StopTemp | Field::ResumeTemp => TEMP_STEP_X10,
            Field::FreezeDuration | Field::RestDuration => DURATION_STEP_S,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Value outside the field's domain bounds
    OutOfRange(Field),
    /// Timer stop temperature not strictly below the resume temperature
    InvertedTempPair,
    /// Record carries a different schema version
    VersionMismatch(u8),
    /// Record could not be persisted
    Store(StoreError),
}

impl From<StoreError> for ConfigError {
    fn from(e: StoreError) -> Self {
        ConfigError::Store(e)
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Record layout version
    pub schema_version: u8,
    /// Active control mode
    pub mode: OperatingMode,
    /// Thermostat setpoint (°C × 10)
    pub thermostat_target_x10: i16,
    /// Freeze phase length (seconds)
    pub freeze_duration_s: u32,
    /// Rest phase length (seconds)
    pub rest_duration_s: u32,
    /// Timer mode: pause the relay at or below this temperature (°C × 10)
    pub timer_stop_temp_x10: i16,
    /// Timer mode: release the pause at or above this temperature (°C × 10)
    pub timer_resume_temp_x10: i16,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            mode: OperatingMode::Timer,
            thermostat_target_x10: -180,
            freeze_duration_s: 1_800,
            rest_duration_s: 900,
            timer_stop_temp_x10: -260,
            timer_resume_temp_x10: -200,
        }
    }
}

impl DeviceConfig {
    /// Check every invariant of the record
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema_version != CONFIG_SCHEMA_VERSION {
            return Err(ConfigError::VersionMismatch(self.schema_version));
        }

        for field in [
            Field::ThermostatTarget,
            Field::FreezeDuration,
            Field::RestDuration,
            Field::StopTemp,
            Field::ResumeTemp,
        ] {
            let (min, max) = field.bounds();
            if !(min..=max).contains(&self.value(field)) {
                return Err(ConfigError::OutOfRange(field));
            }
        }

        if self.timer_stop_temp_x10 >= self.timer_resume_temp_x10 {
            return Err(ConfigError::InvertedTempPair);
        }

        Ok(())
    }

    /// Read a field as a plain number
    pub fn value(&self, field: Field) -> i32 {
        match field {
            Field::Mode => self.mode.as_value(),
            Field::ThermostatTarget => self.thermostat_target_x10 as i32,
            Field::FreezeDuration => self.freeze_duration_s as i32,
            Field::RestDuration => self.rest_duration_s as i32,
            Field::StopTemp => self.timer_stop_temp_x10 as i32,
            Field::ResumeTemp => self.timer_resume_temp_x10 as i32,
        }
    }

    /// Return a copy with one field replaced, validated
    ///
    /// The original record is left untouched on error.
    pub fn with_value(&self, field: Field, value: i32) -> Result<Self, ConfigError> {
        let (min, max) = field.bounds();
        if !(min..=max).contains(&value) {
            return Err(ConfigError::OutOfRange(field));
        }

        let mut next = *self;
        match field {
            Field::Mode => {
                next.mode = OperatingMode::from_value(value).ok_or(ConfigError::OutOfRange(field))?
            }
            Field::ThermostatTarget => next.thermostat_target_x10 = value as i16,
            Field::FreezeDuration => next.freeze_duration_s = value as u32,
            Field::RestDuration => next.rest_duration_s = value as u32,
            Field::StopTemp => next.timer_stop_temp_x10 = value as i16,
            Field::ResumeTemp => next.timer_resume_temp_x10 = value as i16,
        }

        next.validate()?;
        Ok(next)
    }

    /// Bounds for editing `field` from the menu
    ///
    /// Same as [`Field::bounds`], except that the stop/resume pair is
    /// cross-clamped so the edited value stays at least one step away from
    /// its partner. If the partner leaves no room, the range collapses to
    /// the current value.
    pub fn edit_bounds(&self, field: Field) -> (i32, i32) {
        let (min, max) = field.bounds();
        let (min, max) = match field {
            Field::StopTemp => (min, max.min(self.timer_resume_temp_x10 as i32 - field.step())),
            Field::ResumeTemp => (min.max(self.timer_stop_temp_x10 as i32 + field.step()), max),
            _ => (min, max),
        };

        if min > max {
            let current = self.value(field);
            (current, current)
        } else {
            (min, max)
        }
    }

    /// Serialize into `buf`, returning the used prefix
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], StoreError> {
        postcard::to_slice(self, buf).map_err(|_| StoreError::Encode)
    }

    /// Deserialize a stored record
    ///
    /// The version byte is checked before decoding so that a record written
    /// by another schema is reported as such rather than as corruption.
    pub fn decode(bytes: &[u8]) -> Result<Self, StoreError> {
        match bytes.first() {
            None => Err(StoreError::Corrupted),
            Some(&version) if version != CONFIG_SCHEMA_VERSION => {
                Err(StoreError::VersionMismatch(version))
            }
            Some(_) => postcard::from_bytes(bytes).map_err(|_| StoreError::Corrupted),
        }
    }
}
