//! # Runtime Errors
//!
//! Ledger operations fail with `LedgerError`; the runtime adds the failures
//! of its own edges (encoding, scenario input).

use shared_types::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("state encoding failed: {0}")]
    Encoding(String),

    #[error("scenario step {step} ({op}) failed: {source}")]
    ScenarioStep {
        step: usize,
        op: &'static str,
        #[source]
        source: LedgerError,
    },

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

impl From<bincode::Error> for RuntimeError {
    fn from(e: bincode::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}
