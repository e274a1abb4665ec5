//! # Ledger Configuration
//!
//! Unified configuration for the subsystems and the runtime.
//!
//! Every field has a default; `from_env()` applies `ET_*` overrides on top.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `ET_GENERATION_FORWARD_UNITS` | `issuance.generation_forward_units` |
//! | `ET_CERTIFICATES_REQUIRE_APPROVAL` | `transfers.certificates_require_approval` |
//! | `ET_MAX_BATCH_LEN` | `transfers.max_batch_len` |
//! | `ET_LOG_LEVEL` | `logging.level` |

use et_02_balance_ledger::TransferPolicy;
use et_04_forward_issuance::IssuanceConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Complete ledger configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Forward issuance.
    pub issuance: IssuanceConfig,
    /// Transfer rules of the balance ledger.
    pub transfers: TransferPolicy,
    /// Log output.
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_batch_len must be at least 1")]
    ZeroBatchLimit,

    #[error("generation_forward_units must be at least 1")]
    ZeroGenerationStake,

    #[error("unknown log level '{0}', expected trace, debug, info, warn or error")]
    InvalidLogLevel(String),
}

impl LedgerConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`. Unparseable values are logged and
    /// ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(units) = parse_var(&lookup, "ET_GENERATION_FORWARD_UNITS") {
            config.issuance.generation_forward_units = units;
        }
        if let Some(required) = parse_var(&lookup, "ET_CERTIFICATES_REQUIRE_APPROVAL") {
            config.transfers.certificates_require_approval = required;
        }
        if let Some(max) = parse_var(&lookup, "ET_MAX_BATCH_LEN") {
            config.transfers.max_batch_len = max;
        }
        if let Some(level) = lookup("ET_LOG_LEVEL") {
            config.logging.level = level.trim().to_ascii_lowercase();
        }

        config
    }

    /// Rejects settings the ledger cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transfers.max_batch_len == 0 {
            return Err(ConfigError::ZeroBatchLimit);
        }
        if self.issuance.generation_forward_units == 0 {
            return Err(ConfigError::ZeroGenerationStake);
        }
        if tracing::Level::from_str(&self.logging.level).is_err() {
            return Err(ConfigError::InvalidLogLevel(self.logging.level.clone()));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable configuration override");
            None
        }
    }
}
