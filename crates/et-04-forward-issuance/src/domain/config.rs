//! # Issuance Configuration

use serde::{Deserialize, Serialize};
use shared_types::{whole_units, U256};

/// Whole units credited to the issuer when a generation-based series is
/// created.
pub const DEFAULT_GENERATION_FORWARD_UNITS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceConfig {
    pub generation_forward_units: u64,
}

impl Default for IssuanceConfig {
    fn default() -> Self {
        Self {
            generation_forward_units: DEFAULT_GENERATION_FORWARD_UNITS,
        }
    }
}

impl IssuanceConfig {
    /// Issuer stake in 18-decimal units.
    pub fn generation_forward_stake(&self) -> U256 {
        whole_units(self.generation_forward_units)
    }
}
