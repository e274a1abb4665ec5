//! # Claim Topics
//!
//! The application-defined topic catalog. The ledger treats topics as opaque
//! integers and never inspects claim payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A claim topic identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimTopic(pub u64);

impl ClaimTopic {
    /// Holder is a balance authority.
    pub const IS_BALANCE_AUTHORITY: Self = Self(10010);
    /// Holder is a metering authority.
    pub const IS_METERING_AUTHORITY: Self = Self(10020);
    /// Holder is a physical asset authority.
    pub const IS_PHYSICAL_ASSET_AUTHORITY: Self = Self(10030);
    /// Holder is connected to a metering point.
    pub const METERING: Self = Self(10040);
    /// Holder has a balance group.
    pub const BALANCE: Self = Self(10050);
    /// Holder's physical existence is attested.
    pub const EXISTENCE: Self = Self(10060);
    /// Holder's generation type is attested.
    pub const GENERATION_TYPE: Self = Self(10070);
    /// Holder's location is attested.
    pub const LOCATION: Self = Self(10080);
    /// Holder accepts settlement through a registered distributor.
    pub const ACCEPTED_DISTRIBUTOR: Self = Self(10120);

    /// Human-readable topic name, if the topic is in the catalog.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::IS_BALANCE_AUTHORITY => "IsBalanceAuthority",
            Self::IS_METERING_AUTHORITY => "IsMeteringAuthority",
            Self::IS_PHYSICAL_ASSET_AUTHORITY => "IsPhysicalAssetAuthority",
            Self::METERING => "MeteringClaim",
            Self::BALANCE => "BalanceClaim",
            Self::EXISTENCE => "ExistenceClaim",
            Self::GENERATION_TYPE => "GenerationTypeClaim",
            Self::LOCATION => "LocationClaim",
            Self::ACCEPTED_DISTRIBUTOR => "AcceptedDistributorClaim",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Debug for ClaimTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClaimTopic({})", self.0)
    }
}

impl fmt::Display for ClaimTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}
