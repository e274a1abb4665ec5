//! # Recipient Eligibility
//!
//! Which claims an account must hold to receive each token kind.

use et_01_token_codec::TokenKind;
use shared_types::{Address, ClaimTopic, ExecutionEnv, LedgerError, LedgerResult};

/// Claims required to receive any forward.
pub const FORWARD_RECEPTION_CLAIMS: [ClaimTopic; 3] = [
    ClaimTopic::BALANCE,
    ClaimTopic::EXISTENCE,
    ClaimTopic::ACCEPTED_DISTRIBUTOR,
];

/// Claims required to receive certificates.
pub const CERTIFICATE_RECEPTION_CLAIMS: [ClaimTopic; 3] = [
    ClaimTopic::METERING,
    ClaimTopic::BALANCE,
    ClaimTopic::EXISTENCE,
];

pub fn required_reception_claims(kind: TokenKind) -> &'static [ClaimTopic] {
    if kind.is_forward() {
        &FORWARD_RECEPTION_CLAIMS
    } else {
        &CERTIFICATE_RECEPTION_CLAIMS
    }
}

/// Fails with the first missing claim, in catalog order. Claims are judged
/// at the operation's time.
pub fn check_recipient(
    env: &ExecutionEnv<'_>,
    account: &Address,
    kind: TokenKind,
) -> LedgerResult<()> {
    match required_reception_claims(kind)
        .iter()
        .find(|topic| !env.has_claim(account, **topic))
    {
        Some(topic) => Err(LedgerError::RecipientNotEligible {
            account: *account,
            topic: *topic,
        }),
        None => Ok(()),
    }
}
