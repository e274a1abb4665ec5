//! # Codec
//!
//! Pure bit-packing between token attributes and `TokenId`.

use crate::kind::TokenKind;
use serde::{Deserialize, Serialize};
use shared_types::{Address, LedgerError, LedgerResult, SettlementPeriod, TokenId};

const KIND_BYTE: usize = 3;
const PERIOD_RANGE: std::ops::Range<usize> = 4..12;
const ACCOUNT_RANGE: std::ops::Range<usize> = 12..32;

/// The semantic attributes a token id is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDescriptor {
    /// Commercial class.
    pub kind: TokenKind,
    /// Settlement period (unix timestamp).
    pub period: SettlementPeriod,
    /// Generation or consumption site of record.
    pub account: Address,
}

impl TokenDescriptor {
    /// Bundles the three attributes.
    #[must_use]
    pub const fn new(kind: TokenKind, period: SettlementPeriod, account: Address) -> Self {
        Self {
            kind,
            period,
            account,
        }
    }

    /// Packs the descriptor into its token id.
    #[must_use]
    pub fn token_id(&self) -> TokenId {
        encode(self.kind, self.period, &self.account)
    }
}

/// Derives the token id for `(kind, period, account)`.
#[must_use]
pub fn encode(kind: TokenKind, period: SettlementPeriod, account: &Address) -> TokenId {
    let mut bytes = [0u8; 32];
    bytes[KIND_BYTE] = kind.code();
    bytes[PERIOD_RANGE].copy_from_slice(&period.to_be_bytes());
    bytes[ACCOUNT_RANGE].copy_from_slice(account.as_bytes());
    TokenId::from_bytes(bytes)
}

/// Recovers the attributes of a token id.
///
/// # Errors
///
/// - `NonCanonicalTokenId` if any padding bit is set
/// - `InvalidKind` if the kind byte is not in the code table
pub fn decode(id: &TokenId) -> LedgerResult<TokenDescriptor> {
    let bytes = id.to_bytes();
    if bytes[..KIND_BYTE].iter().any(|b| *b != 0) {
        return Err(LedgerError::NonCanonicalTokenId(*id));
    }
    let kind = TokenKind::from_code(bytes[KIND_BYTE])?;

    let mut period = [0u8; 8];
    period.copy_from_slice(&bytes[PERIOD_RANGE]);
    let account = Address::from_slice(&bytes[ACCOUNT_RANGE])
        .ok_or(LedgerError::NonCanonicalTokenId(*id))?;

    Ok(TokenDescriptor {
        kind,
        period: u64::from_be_bytes(period),
        account,
    })
}

/// Code stored for `kind`.
#[must_use]
pub const fn kind_to_code(kind: TokenKind) -> u8 {
    kind.code()
}

/// Kind stored under `code`.
///
/// # Errors
///
/// `InvalidKind` for codes outside the table.
pub fn code_to_kind(code: u8) -> LedgerResult<TokenKind> {
    TokenKind::from_code(code)
}

/// The certificate id settling a forward: same period and reference account,
/// kind `Certificate`.
#[must_use]
pub fn certificate_id_for(forward: &TokenDescriptor) -> TokenId {
    encode(TokenKind::Certificate, forward.period, &forward.account)
}
