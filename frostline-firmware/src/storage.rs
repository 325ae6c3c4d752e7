//! Flash-backed configuration store
//!
//! Stores the postcard-encoded settings record under
//! [`StorageKey::DeviceConfig`]. The flash driver is async; every access
//! here runs to completion with `block_on` because the main loop has no
//! executor.

use embassy_futures::block_on;
use frostline_core::config::{DeviceConfig, MAX_ENCODED_CONFIG_LEN};
use frostline_core::traits::{ConfigStore, StoreError};
use frostline_hal::{FlashError, FlashStorage, StorageKey};

/// [`ConfigStore`] over any [`FlashStorage`]
pub struct FlashConfigStore<F> {
    flash: F,
}

impl<F: FlashStorage> FlashConfigStore<F> {
    pub fn new(flash: F) -> Self {
        Self { flash }
    }
}

fn store_error(e: FlashError) -> StoreError {
    match e {
        FlashError::NotFound => StoreError::NotFound,
        FlashError::Corrupted | FlashError::BufferTooSmall => StoreError::Corrupted,
        FlashError::Flash | FlashError::Storage | FlashError::Full => StoreError::Storage,
    }
}

impl<F: FlashStorage> ConfigStore for FlashConfigStore<F> {
    fn load(&mut self) -> Result<DeviceConfig, StoreError> {
        let mut buf = [0u8; MAX_ENCODED_CONFIG_LEN];
        let len = block_on(self.flash.read(StorageKey::DeviceConfig, &mut buf))
            .map_err(store_error)?;
        DeviceConfig::decode(&buf[..len])
    }

    fn save(&mut self, config: &DeviceConfig) -> Result<(), StoreError> {
        let mut buf = [0u8; MAX_ENCODED_CONFIG_LEN];
        let bytes = config.encode(&mut buf)?;
        block_on(self.flash.write(StorageKey::DeviceConfig, bytes)).map_err(store_error)
    }
}
