//! # Container
//!
//! Configuration and the state object every operation runs against.

pub mod config;
pub mod state;

pub use config::{ConfigError, LedgerConfig, LoggingConfig};
pub use state::LedgerState;
