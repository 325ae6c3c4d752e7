//! Validated, persisted configuration
//!
//! [`Configuration`] owns the live record and the store it is persisted to.
//! Every setter validates the new record, saves it, and only then replaces
//! the live copy, so a failed save leaves the previous value in effect.

use super::types::{ConfigError, DeviceConfig, Field};
use crate::traits::{ConfigStore, StoreError};

/// Where the startup configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadSource {
    /// Valid record read from storage
    Stored,
    /// Defaults, because nothing was stored
    DefaultsMissing,
    /// Defaults, because the stored record had another schema version
    DefaultsVersionMismatch(u8),
    /// Defaults, because the stored record could not be decoded
    DefaultsCorrupted,
    /// Defaults, because the stored record failed validation
    DefaultsInvalid(ConfigError),
    /// Defaults, because storage could not be read
    DefaultsStorageError,
}

/// Outcome of [`Configuration::load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoadReport {
    pub source: LoadSource,
    /// Result of re-persisting the defaults, if that was attempted
    pub persisted: Option<Result<(), StoreError>>,
}

/// Live configuration plus its backing store
pub struct Configuration<S: ConfigStore> {
    store: S,
    current: DeviceConfig,
}

impl<S: ConfigStore> Configuration<S> {
    /// Load the configuration, falling back to defaults
    ///
    /// Any record that cannot be used is replaced by the compiled-in
    /// defaults, which are written back immediately.
    pub fn load(mut store: S) -> (Self, LoadReport) {
        let source = match store.load() {
            Ok(config) => match config.validate() {
                Ok(()) => {
                    let report = LoadReport {
                        source: LoadSource::Stored,
                        persisted: None,
                    };
                    return (
                        Self {
                            store,
                            current: config,
                        },
                        report,
                    );
                }
                Err(ConfigError::VersionMismatch(v)) => LoadSource::DefaultsVersionMismatch(v),
                Err(e) => LoadSource::DefaultsInvalid(e),
            },
            Err(StoreError::NotFound) => LoadSource::DefaultsMissing,
            Err(StoreError::VersionMismatch(v)) => LoadSource::DefaultsVersionMismatch(v),
            Err(StoreError::Corrupted) => LoadSource::DefaultsCorrupted,
            Err(StoreError::Encode | StoreError::Storage) => LoadSource::DefaultsStorageError,
        };

        let current = DeviceConfig::default();
        let persisted = Some(store.save(&current));

        (Self { store, current }, LoadReport { source, persisted })
    }

    /// Live record
    pub fn get(&self) -> &DeviceConfig {
        &self.current
    }

    /// Replace one field
    ///
    /// Returns `Ok(false)` if the value is unchanged (nothing is saved).
    pub fn set_field(&mut self, field: Field, value: i32) -> Result<bool, ConfigError> {
        if self.current.value(field) == value {
            return Ok(false);
        }
        let next = self.current.with_value(field, value)?;
        self.commit(next)
    }

    /// Replace both safety cutoff temperatures at once
    ///
    /// The pair is validated together, so the order of the two values
    /// relative to the current record does not matter.
    pub fn set_timer_temps(&mut self, stop_x10: i16, resume_x10: i16) -> Result<bool, ConfigError> {
        if self.current.timer_stop_temp_x10 == stop_x10
            && self.current.timer_resume_temp_x10 == resume_x10
        {
            return Ok(false);
        }

        for (field, value) in [(Field::StopTemp, stop_x10), (Field::ResumeTemp, resume_x10)] {
            let (min, max) = field.bounds();
            if !(min..=max).contains(&(value as i32)) {
                return Err(ConfigError::OutOfRange(field));
            }
        }

        let mut next = self.current;
        next.timer_stop_temp_x10 = stop_x10;
        next.timer_resume_temp_x10 = resume_x10;
        next.validate()?;
        self.commit(next)
    }

    fn commit(&mut self, next: DeviceConfig) -> Result<bool, ConfigError> {
        self.store.save(&next)?;
        self.current = next;
        Ok(true)
    }

    /// Backing store
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{OperatingMode, CONFIG_SCHEMA_VERSION};
    use crate::testing::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn test_load_stored_record() {
        let mut stored = DeviceConfig::default();
        stored.mode = OperatingMode::Thermostat;
        stored.thermostat_target_x10 = -120;

        let (config, report) = Configuration::load(MemoryStore::with_config(&stored));
        assert_eq!(report.source, LoadSource::Stored);
        assert_eq!(report.persisted, None);
        assert_eq!(*config.get(), stored);
        assert_eq!(config.store().saves, 0);
    }

    #[test]
    fn test_load_missing_persists_defaults() {
        let (config, report) = Configuration::load(MemoryStore::empty());
        assert_eq!(report.source, LoadSource::DefaultsMissing);
        assert_eq!(report.persisted, Some(Ok(())));
        assert_eq!(*config.get(), DeviceConfig::default());
        assert_eq!(config.store().stored(), Some(DeviceConfig::default()));
    }

    #[test]
    fn test_load_corrupted_persists_defaults() {
        let (config, report) = Configuration::load(MemoryStore::with_bytes(&[
            CONFIG_SCHEMA_VERSION,
            0xFF,
            0xFF,
        ]));
        assert_eq!(report.source, LoadSource::DefaultsCorrupted);
        assert_eq!(config.store().stored(), Some(DeviceConfig::default()));
    }

    #[test]
    fn test_load_invalid_record_persists_defaults() {
        let mut stored = DeviceConfig::default();
        stored.timer_stop_temp_x10 = -100;
        stored.timer_resume_temp_x10 = -150;

        let (config, report) = Configuration::load(MemoryStore::with_config(&stored));
        assert_eq!(
            report.source,
            LoadSource::DefaultsInvalid(ConfigError::InvertedTempPair)
        );
        assert_eq!(*config.get(), DeviceConfig::default());
        assert_eq!(config.store().stored(), Some(DeviceConfig::default()));
    }

    #[test]
    fn test_load_reports_failed_persist() {
        let mut store = MemoryStore::empty();
        store.fail_saves = true;
        let (config, report) = Configuration::load(store);
        assert_eq!(report.persisted, Some(Err(StoreError::Storage)));
        assert_eq!(*config.get(), DeviceConfig::default());
    }

    #[test]
    fn test_set_field_persists_full_record() {
        let (mut config, _) = Configuration::load(MemoryStore::with_config(&DeviceConfig::default()));
        assert_eq!(config.set_field(Field::FreezeDuration, 600), Ok(true));
        assert_eq!(config.get().freeze_duration_s, 600);
        assert_eq!(config.store().stored(), Some(*config.get()));
        assert_eq!(config.store().saves, 1);
    }

    #[test]
    fn test_set_unchanged_value_skips_save() {
        let (mut config, _) = Configuration::load(MemoryStore::with_config(&DeviceConfig::default()));
        assert_eq!(config.set_field(Field::RestDuration, 900), Ok(false));
        assert_eq!(config.store().saves, 0);
    }

    #[test]
    fn test_rejected_value_keeps_prior() {
        let (mut config, _) = Configuration::load(MemoryStore::with_config(&DeviceConfig::default()));
        assert_eq!(
            config.set_field(Field::ThermostatTarget, -400),
            Err(ConfigError::OutOfRange(Field::ThermostatTarget))
        );
        assert_eq!(
            config.set_field(Field::FreezeDuration, i32::MAX),
            Err(ConfigError::OutOfRange(Field::FreezeDuration))
        );
        assert_eq!(*config.get(), DeviceConfig::default());
        assert_eq!(config.store().saves, 0);
    }

    #[test]
    fn test_failed_save_keeps_prior() {
        let (mut config, _) = Configuration::load(MemoryStore::with_config(&DeviceConfig::default()));
        config.store.fail_saves = true;
        assert_eq!(
            config.set_field(Field::Mode, OperatingMode::Thermostat.as_value()),
            Err(ConfigError::Store(StoreError::Storage))
        );
        assert_eq!(config.get().mode, OperatingMode::Timer);
    }

    #[test]
    fn test_set_timer_temps_validates_pair() {
        let (mut config, _) = Configuration::load(MemoryStore::with_config(&DeviceConfig::default()));
        // Both values move past the current partner, only valid as a pair
        assert_eq!(config.set_timer_temps(-150, -100), Ok(true));
        assert_eq!(config.get().timer_stop_temp_x10, -150);
        assert_eq!(config.get().timer_resume_temp_x10, -100);

        assert_eq!(
            config.set_timer_temps(-100, -100),
            Err(ConfigError::InvertedTempPair)
        );
        assert_eq!(
            config.set_timer_temps(-410, -100),
            Err(ConfigError::OutOfRange(Field::StopTemp))
        );
        assert_eq!(config.get().timer_stop_temp_x10, -150);
    }

    proptest! {
        #[test]
        fn prop_foreign_version_falls_back_to_defaults(
            version in any::<u8>().prop_filter("current", |v| *v != CONFIG_SCHEMA_VERSION),
            target in -300i16..=100,
            freeze in 5u32..=43_200,
        ) {
            let mut stored = DeviceConfig::default();
            stored.schema_version = version;
            stored.thermostat_target_x10 = target;
            stored.freeze_duration_s = freeze;

            let (config, report) = Configuration::load(MemoryStore::with_config(&stored));
            prop_assert_eq!(report.source, LoadSource::DefaultsVersionMismatch(version));
            prop_assert_eq!(*config.get(), DeviceConfig::default());
            prop_assert_eq!(config.store().stored(), Some(DeviceConfig::default()));
        }
    }
}
