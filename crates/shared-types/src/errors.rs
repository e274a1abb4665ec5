//! # Error Types
//!
//! The single error taxonomy shared by every energy-token subsystem. Every
//! failure is local to one operation: the operation aborts, ledger state is
//! left untouched, and the caller decides whether to retry.

use crate::claims::ClaimTopic;
use crate::entities::{Address, SettlementPeriod, TokenId, U256};
use thiserror::Error;

/// Errors that can occur in any ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Token id carries a kind code outside the code table.
    #[error("Invalid token kind code: {code}")]
    InvalidKind { code: u8 },

    /// Token id has non-zero bits in its padding region.
    #[error("Non-canonical token id: {0}")]
    NonCanonicalTokenId(TokenId),

    /// Parallel input arrays differ in length.
    #[error("Length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Batch exceeds the configured maximum length.
    #[error("Batch too large: {len} > {max}")]
    BatchTooLarge { len: usize, max: usize },

    /// Sender does not hold enough of the token.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    /// Recipient lacks a claim required to hold the token kind.
    #[error("Recipient {account:?} not eligible: missing claim {topic}")]
    RecipientNotEligible { account: Address, topic: ClaimTopic },

    /// No matching unexpired reception approval covers the quantity.
    #[error("Reception approval exceeded: requested {requested}, approved {approved}")]
    ApprovalExceeded { requested: U256, approved: U256 },

    /// Forward series was already issued.
    #[error("Forward series already exists: {0}")]
    SeriesAlreadyExists(TokenId),

    /// Forward series was never issued.
    #[error("Forward series not found: {0}")]
    SeriesNotFound(TokenId),

    /// Attempt to replace a corrected reading with a provisional one.
    #[error("Correction downgrade rejected for {account:?} in period {period}")]
    CorrectionDowngradeRejected {
        account: Address,
        period: SettlementPeriod,
    },

    /// Caller is not allowed to perform the operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Token kind is not a forward where a forward is required.
    #[error("Invalid forward kind code: {code}")]
    InvalidForwardKind { code: u8 },

    /// Consumption-based settlement without documented generation.
    #[error("No generation documented for {account:?} in period {period}")]
    DivisionByUndefinedGeneration {
        account: Address,
        period: SettlementPeriod,
    },

    /// Distributor cannot cover the certificate payout.
    #[error("Insufficient certificate reserve: required {required}, available {available}")]
    InsufficientCertificateReserve { required: U256, available: U256 },

    /// 256-bit arithmetic overflowed.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Malformed hex input.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
