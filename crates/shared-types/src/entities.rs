//! # Core Domain Entities
//!
//! Value objects shared across the energy-token subsystems.
//!
//! ## Clusters
//!
//! - **Identity**: `Address` (20-byte identity-contract address)
//! - **Assets**: `TokenId` (packed 256-bit identifier), `Quantity`
//! - **Time**: `SettlementPeriod`, `Timestamp`

use crate::errors::{LedgerError, LedgerResult};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// Unix timestamp marking the boundary of a metering interval.
pub type SettlementPeriod = u64;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Token quantity in base units (18 decimals).
pub type Quantity = U256;

/// Number of decimals carried by every token quantity.
pub const DECIMALS: usize = 18;

/// One whole token expressed in base units (10^18).
#[must_use]
pub fn unit() -> U256 {
    U256::exp10(DECIMALS)
}

/// Converts a whole-token amount into base units.
#[must_use]
pub fn whole_units(amount: u64) -> U256 {
    U256::from(amount) * unit()
}

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte identity-contract address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 20 {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Parses a hex address, with or without `0x` prefix, any letter case.
    pub fn from_hex(input: &str) -> LedgerResult<Self> {
        let digits = strip_hex_prefix(input);
        let bytes = hex::decode(digits).map_err(|e| LedgerError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes).ok_or_else(|| {
            LedgerError::InvalidHex(format!("expected 20 bytes, got {}", bytes.len()))
        })
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Full lower-case `0x`-prefixed rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(de::Error::custom)
    }
}

// =============================================================================
// TOKEN ID (32 bytes)
// =============================================================================

/// An opaque 256-bit token identifier.
///
/// Token ids are always derived from `(kind, period, reference account)` by
/// the codec in `et-01-token-codec`; this type only carries the raw value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenId(pub U256);

impl TokenId {
    /// Creates a token id from its big-endian byte representation.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(U256::from_big_endian(&bytes))
    }

    /// Returns the big-endian byte representation.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.0.to_big_endian(&mut bytes);
        bytes
    }

    /// Parses a hex token id. Shorter inputs are left-padded with zeros.
    pub fn from_hex(input: &str) -> LedgerResult<Self> {
        let digits = strip_hex_prefix(input);
        if digits.is_empty() || digits.len() > 64 {
            return Err(LedgerError::InvalidHex(format!(
                "token id must have 1..=64 hex digits, got {}",
                digits.len()
            )));
        }
        let padded = format!("{digits:0>64}");
        let decoded = hex::decode(padded).map_err(|e| LedgerError::InvalidHex(e.to_string()))?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        Ok(Self::from_bytes(bytes))
    }

    /// Full 64-digit lower-case `0x`-prefixed rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", self.to_hex())
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<U256> for TokenId {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl Serialize for TokenId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TokenId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(de::Error::custom)
    }
}

fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}
