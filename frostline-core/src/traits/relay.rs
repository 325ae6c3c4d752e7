//! Relay output trait

/// Trait for the load relay output
///
/// Implementations drive the relay coil via GPIO, directly or through a
/// transistor/SSR stage.
pub trait RelayOutput {
    /// Engage or release the relay
    fn set_engaged(&mut self, engaged: bool);

    /// Check if the relay is currently engaged
    fn is_engaged(&self) -> bool;
}
