//! # Token Kinds

use serde::{Deserialize, Serialize};
use shared_types::{LedgerError, LedgerResult};
use std::fmt;

/// The commercial class of an energy token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Fixed delivery commitment, independent of metered output.
    AbsoluteForward,
    /// Pro-rata share of a plant's metered generation.
    GenerationBasedForward,
    /// Share of the holder's metered consumption, capped by generation.
    ConsumptionBasedForward,
    /// Proof of settled delivery.
    Certificate,
}

impl TokenKind {
    /// All kinds in position order.
    pub const ALL: [Self; 4] = [
        Self::AbsoluteForward,
        Self::GenerationBasedForward,
        Self::ConsumptionBasedForward,
        Self::Certificate,
    ];

    /// The forward kinds.
    pub const FORWARDS: [Self; 3] = [
        Self::AbsoluteForward,
        Self::GenerationBasedForward,
        Self::ConsumptionBasedForward,
    ];

    /// Code stored in the token id.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::AbsoluteForward => 0x00,
            Self::GenerationBasedForward => 0x02,
            Self::ConsumptionBasedForward => 0x03,
            Self::Certificate => 0x04,
        }
    }

    /// Inverse of [`TokenKind::code`].
    pub fn from_code(code: u8) -> LedgerResult<Self> {
        match code {
            0x00 => Ok(Self::AbsoluteForward),
            0x02 => Ok(Self::GenerationBasedForward),
            0x03 => Ok(Self::ConsumptionBasedForward),
            0x04 => Ok(Self::Certificate),
            _ => Err(LedgerError::InvalidKind { code }),
        }
    }

    /// Logical enumeration position used at the outer surface.
    #[must_use]
    pub const fn position(self) -> u8 {
        match self {
            Self::AbsoluteForward => 0,
            Self::GenerationBasedForward => 1,
            Self::ConsumptionBasedForward => 2,
            Self::Certificate => 3,
        }
    }

    /// Inverse of [`TokenKind::position`].
    pub fn from_position(position: u8) -> LedgerResult<Self> {
        Self::ALL
            .get(usize::from(position))
            .copied()
            .ok_or(LedgerError::InvalidKind { code: position })
    }

    /// True for the three forward kinds.
    #[must_use]
    pub const fn is_forward(self) -> bool {
        !matches!(self, Self::Certificate)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AbsoluteForward => "absolute-forward",
            Self::GenerationBasedForward => "generation-based-forward",
            Self::ConsumptionBasedForward => "consumption-based-forward",
            Self::Certificate => "certificate",
        };
        f.write_str(name)
    }
}
