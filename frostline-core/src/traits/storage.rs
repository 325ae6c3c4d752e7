//! Configuration storage trait

use crate::config::DeviceConfig;

/// Errors from configuration storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// No record stored yet
    NotFound,
    /// Stored record has a different schema version
    VersionMismatch(u8),
    /// Stored bytes could not be decoded
    Corrupted,
    /// Record could not be encoded
    Encode,
    /// Underlying storage operation failed
    Storage,
}

/// Persistent storage for the device configuration
///
/// Implementations persist the full record on every save; a record is
/// never partially written from the caller's point of view.
pub trait ConfigStore {
    /// Load the stored record
    fn load(&mut self) -> Result<DeviceConfig, StoreError>;

    /// Persist a complete record
    fn save(&mut self, config: &DeviceConfig) -> Result<(), StoreError>;
}
