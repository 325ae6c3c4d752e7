//! Safety cutoff
//!
//! Guards against over-cooling while the duty-cycle timer is in control.

pub mod cutoff;

pub use cutoff::SafetyCutoff;
