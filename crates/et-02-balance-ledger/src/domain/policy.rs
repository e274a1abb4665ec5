//! # Transfer Policy

use et_01_token_codec::TokenKind;
use serde::{Deserialize, Serialize};

/// Default maximum number of items in one batch transfer or mint.
pub const DEFAULT_MAX_BATCH_LEN: usize = 256;

/// Tunables of the balance ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPolicy {
    /// Whether peer-to-peer certificate transfers need a reception approval.
    /// Forwards always do.
    pub certificates_require_approval: bool,
    /// Longest accepted batch.
    pub max_batch_len: usize,
}

impl Default for TransferPolicy {
    fn default() -> Self {
        Self {
            certificates_require_approval: true,
            max_batch_len: DEFAULT_MAX_BATCH_LEN,
        }
    }
}

impl TransferPolicy {
    pub fn requires_approval(&self, kind: TokenKind) -> bool {
        kind.is_forward() || self.certificates_require_approval
    }
}
