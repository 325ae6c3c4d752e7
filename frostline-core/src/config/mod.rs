//! Device configuration
//!
//! A single versioned record, validated on every change and persisted
//! through a [`ConfigStore`](crate::traits::ConfigStore) before it takes
//! effect.

pub mod store;
pub mod types;

pub use store::{Configuration, LoadReport, LoadSource};
pub use types::*;
