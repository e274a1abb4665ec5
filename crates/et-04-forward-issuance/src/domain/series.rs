//! # Forward Series

use et_01_token_codec::{TokenDescriptor, TokenKind};
use serde::{Deserialize, Serialize};
use shared_types::{Address, SettlementPeriod, TokenId};

/// Issuance marker of one forward series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardSeries {
    pub token_id: TokenId,
    pub kind: TokenKind,
    pub period: SettlementPeriod,
    /// Generation site the series references; also its issuer.
    pub reference_account: Address,
    /// Account paying out certificates against the series.
    pub distributor: Address,
}

impl ForwardSeries {
    pub fn descriptor(&self) -> TokenDescriptor {
        TokenDescriptor::new(self.kind, self.period, self.reference_account)
    }
}
