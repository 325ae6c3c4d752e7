//! Flash storage abstractions
//!
//! Wear-levelled key-value storage for records that must survive a power
//! cycle.

/// Storage keys
///
/// The numbering is fixed because keys are written to flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Device configuration record (postcard)
    DeviceConfig = 0,
}

impl StorageKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::DeviceConfig),
            _ => None,
        }
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash peripheral reported an error
    Flash,
    /// Storage layer failed
    Storage,
    /// Key not found
    NotFound,
    /// Buffer too small for the stored item
    BufferTooSmall,
    /// Stored item failed its integrity check
    Corrupted,
    /// No free space left after garbage collection
    Full,
}

/// Flash storage trait
///
/// Writes are atomic per key: a reader sees either the previous item or
/// the new one.
pub trait FlashStorage {
    /// Read the item stored under `key` into `buffer`
    ///
    /// Returns the item length.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Store `data` under `key`, replacing any previous item
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        let slot = buffer
            .first_mut()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        *slot = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        let byte = buffer
            .first()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        StorageKey::from_u8(*byte)
            .map(|key| (key, 1))
            .ok_or(sequential_storage::map::SerializationError::InvalidFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_byte_round_trip() {
        let key = StorageKey::DeviceConfig;
        assert_eq!(StorageKey::from_u8(key.as_u8()), Some(key));
        assert_eq!(StorageKey::from_u8(1), None);
        assert_eq!(StorageKey::from_u8(0xFF), None);
    }
}
