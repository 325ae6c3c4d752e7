//! Mock collaborators for unit tests

use crate::config::{DeviceConfig, MAX_ENCODED_CONFIG_LEN};
use crate::traits::{
    CharDisplay, ConfigStore, Console, DisplayError, DoorSensor, EncoderInputs, EncoderSample,
    RelayOutput, SensorError, StoreError, TemperatureProbe,
};

/// Config store backed by a byte buffer, encoding like flash does
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub bytes: Option<Vec<u8>>,
    pub saves: u32,
    pub fail_saves: bool,
}

impl MemoryStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: Some(bytes.to_vec()),
            ..Self::default()
        }
    }

    pub fn with_config(config: &DeviceConfig) -> Self {
        let mut buf = [0u8; MAX_ENCODED_CONFIG_LEN];
        let bytes = config.encode(&mut buf).unwrap();
        Self::with_bytes(bytes)
    }

    /// Decoded record currently stored
    pub fn stored(&self) -> Option<DeviceConfig> {
        self.bytes
            .as_deref()
            .and_then(|b| DeviceConfig::decode(b).ok())
    }
}

impl ConfigStore for MemoryStore {
    fn load(&mut self) -> Result<DeviceConfig, StoreError> {
        match &self.bytes {
            Some(bytes) => DeviceConfig::decode(bytes),
            None => Err(StoreError::NotFound),
        }
    }

    fn save(&mut self, config: &DeviceConfig) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Storage);
        }
        let mut buf = [0u8; MAX_ENCODED_CONFIG_LEN];
        let bytes = config.encode(&mut buf)?;
        self.bytes = Some(bytes.to_vec());
        self.saves += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockRelay {
    pub engaged: bool,
    pub writes: u32,
}

impl RelayOutput for MockRelay {
    fn set_engaged(&mut self, engaged: bool) {
        self.engaged = engaged;
        self.writes += 1;
    }

    fn is_engaged(&self) -> bool {
        self.engaged
    }
}

#[derive(Debug)]
pub struct MockProbe {
    pub result: Result<i16, SensorError>,
    pub request_error: Option<SensorError>,
    pub requests: u32,
    pub reads: u32,
}

impl MockProbe {
    pub fn reading(temp_x10: i16) -> Self {
        Self {
            result: Ok(temp_x10),
            request_error: None,
            requests: 0,
            reads: 0,
        }
    }
}

impl TemperatureProbe for MockProbe {
    fn request_conversion(&mut self) -> Result<(), SensorError> {
        self.requests += 1;
        match self.request_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn read_last_result_x10(&mut self) -> Result<i16, SensorError> {
        self.reads += 1;
        self.result
    }
}

#[derive(Debug, Default)]
pub struct MockDoor {
    pub open: bool,
}

impl DoorSensor for MockDoor {
    fn is_open(&mut self) -> bool {
        self.open
    }
}

/// Encoder replaying a script of samples, then holding the last one
#[derive(Debug, Default)]
pub struct MockEncoder {
    pub script: std::collections::VecDeque<EncoderSample>,
    pub last: EncoderSample,
}

impl MockEncoder {
    pub fn push(&mut self, a: bool, b: bool, pressed: bool) {
        self.script.push_back(EncoderSample { a, b, pressed });
    }

    /// One detent clockwise
    pub fn turn_cw(&mut self) {
        self.push(true, false, false);
        self.push(false, false, false);
    }

    /// One debounced press and release
    pub fn click(&mut self) {
        for _ in 0..3 {
            self.push(false, false, true);
        }
        for _ in 0..3 {
            self.push(false, false, false);
        }
    }
}

impl EncoderInputs for MockEncoder {
    fn sample(&mut self) -> EncoderSample {
        if let Some(s) = self.script.pop_front() {
            self.last = s;
        }
        self.last
    }
}

#[derive(Debug, Default)]
pub struct MockDisplay {
    pub lines: Vec<(String, String)>,
    pub fail: bool,
}

impl CharDisplay for MockDisplay {
    fn write_lines(&mut self, top: &str, bottom: &str) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Bus);
        }
        self.lines.push((top.into(), bottom.into()));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockConsole {
    pub input: std::collections::VecDeque<u8>,
    pub output: String,
}

impl MockConsole {
    pub fn type_line(&mut self, line: &str) {
        self.input.extend(line.bytes());
        self.input.push_back(b'\r');
    }

    pub fn take_output(&mut self) -> String {
        core::mem::take(&mut self.output)
    }
}

impl Console for MockConsole {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn write_str(&mut self, text: &str) {
        self.output.push_str(text);
    }
}
