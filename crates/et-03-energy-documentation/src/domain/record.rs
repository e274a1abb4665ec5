//! # Documentation Records

use serde::{Deserialize, Serialize};
use shared_types::{Address, SettlementPeriod, U256};
use std::fmt;

/// Whether a reading measures energy produced or energy drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyDirection {
    Generation,
    Consumption,
}

impl fmt::Display for EnergyDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generation => f.write_str("generation"),
            Self::Consumption => f.write_str("consumption"),
        }
    }
}

/// The reading currently on file for one `(account, period)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyDocumentation {
    /// Measured energy, in 18-decimal units.
    pub value: U256,
    /// Final reading; can only be replaced by another final reading.
    pub is_corrected: bool,
    /// Metering authority of the most recent accepted write.
    pub attesting_authority: Address,
    pub direction: EnergyDirection,
}

impl EnergyDocumentation {
    /// The value if this is a generation reading, else zero.
    pub fn generation(&self) -> U256 {
        self.value_for(EnergyDirection::Generation)
    }

    /// The value if this is a consumption reading, else zero.
    pub fn consumption(&self) -> U256 {
        self.value_for(EnergyDirection::Consumption)
    }

    fn value_for(&self, direction: EnergyDirection) -> U256 {
        if self.direction == direction {
            self.value
        } else {
            U256::zero()
        }
    }
}

/// One row of the documentation table, for snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationEntry {
    pub account: Address,
    pub period: SettlementPeriod,
    pub value: U256,
    pub is_corrected: bool,
    pub attesting_authority: Address,
    pub direction: EnergyDirection,
}

impl DocumentationEntry {
    pub fn new(account: Address, period: SettlementPeriod, record: &EnergyDocumentation) -> Self {
        Self {
            account,
            period,
            value: record.value,
            is_corrected: record.is_corrected,
            attesting_authority: record.attesting_authority,
            direction: record.direction,
        }
    }
}
