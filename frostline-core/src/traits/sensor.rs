//! Temperature probe and door switch traits

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// No device answered the bus reset
    NotPresent,
    /// Data integrity check failed
    CrcMismatch,
    /// Result register still holds the power-on value
    NotReady,
    /// Reading out of the probe's measurable range
    OutOfRange,
    /// Low-level bus failure
    Bus,
}

/// Trait for a temperature probe with a separate conversion step
///
/// The probe is never waited on: the caller requests a conversion and only
/// reads the result once the probe's conversion interval has passed.
pub trait TemperatureProbe {
    /// Start a conversion (fire-and-forget)
    fn request_conversion(&mut self) -> Result<(), SensorError>;

    /// Read the result of the last conversion
    ///
    /// Returns a fixed-point value with 0.1°C resolution.
    /// For example, -18.5°C is returned as -185.
    fn read_last_result_x10(&mut self) -> Result<i16, SensorError>;
}

/// Trait for the optional door switch
pub trait DoorSensor {
    /// Check if the door is currently open
    fn is_open(&mut self) -> bool;
}

/// Door sensor for boards without a door switch
///
/// Always reports a closed door.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDoor;

impl DoorSensor for NoDoor {
    fn is_open(&mut self) -> bool {
        false
    }
}
