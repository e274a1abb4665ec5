//! # Driven Ports
//!
//! Interfaces the ledger core depends on but does not implement:
//! - Identity / claims gateway (claim validity, proxied execution)
//! - Clock (approval expiry)
//!
//! Adapters implement these traits; `registry.rs` carries the in-memory ones.

use crate::claims::ClaimTopic;
use crate::entities::{Address, Timestamp};
use crate::errors::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};

// =============================================================================
// CALL CONTEXT
// =============================================================================

/// Who is calling, and through which identity.
///
/// `signer` is the externally held key that authorized the call.
/// `via_identity` is set when the call was forwarded by an identity account
/// executing on the signer's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Key that signed the call.
    pub signer: Address,
    /// Identity account the call is executed through, if any.
    #[serde(default)]
    pub via_identity: Option<Address>,
}

impl CallContext {
    /// A call made directly with a key.
    #[must_use]
    pub const fn direct(signer: Address) -> Self {
        Self {
            signer,
            via_identity: None,
        }
    }

    /// A call proxied through an identity account.
    #[must_use]
    pub const fn via(signer: Address, identity: Address) -> Self {
        Self {
            signer,
            via_identity: Some(identity),
        }
    }
}

// =============================================================================
// CLAIMS GATEWAY
// =============================================================================

/// Identity and claims capability.
///
/// Validity (signature, issuer trust, expiry) is entirely the gateway's
/// concern; the ledger only asks yes/no questions.
pub trait ClaimsGateway: Send + Sync {
    /// Does `account` hold a claim of `topic` that is still valid at `at`?
    ///
    /// The ledger passes the instant its operation executes at, so claim and
    /// approval expiry are judged against the same time.
    fn has_valid_claim(&self, account: &Address, topic: ClaimTopic, at: Timestamp) -> bool;

    /// Resolves the account a call executes on behalf of.
    ///
    /// Returns `None` when the call is not proxied through an identity, or the
    /// signer does not control the identity it claims to act through.
    fn acting_account(&self, ctx: &CallContext) -> Option<Address>;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current unix time in seconds.
    fn now(&self) -> Timestamp;
}

// =============================================================================
// EXECUTION ENVIRONMENT
// =============================================================================

/// Everything an operation needs from outside the ledger tables.
///
/// Built once per operation so every check within it sees the same time.
#[derive(Clone, Copy)]
pub struct ExecutionEnv<'a> {
    /// Claims capability.
    pub claims: &'a dyn ClaimsGateway,
    /// Time at which the operation executes.
    pub now: Timestamp,
}

impl<'a> ExecutionEnv<'a> {
    /// Creates an environment reading the time from `clock`.
    pub fn new(claims: &'a dyn ClaimsGateway, clock: &dyn Clock) -> Self {
        Self {
            claims,
            now: clock.now(),
        }
    }

    /// Creates an environment at a fixed time.
    #[must_use]
    pub fn at(claims: &'a dyn ClaimsGateway, now: Timestamp) -> Self {
        Self { claims, now }
    }

    /// Resolves the acting account or fails with `Unauthorized`.
    pub fn acting_account(&self, ctx: &CallContext) -> LedgerResult<Address> {
        self.claims.acting_account(ctx).ok_or_else(|| {
            LedgerError::Unauthorized(format!(
                "signer {:?} is not executing through an identity it controls",
                ctx.signer
            ))
        })
    }

    /// Requires the acting account to be exactly `expected`.
    pub fn require_acting_as(&self, ctx: &CallContext, expected: &Address) -> LedgerResult<()> {
        let acting = self.acting_account(ctx)?;
        if acting != *expected {
            return Err(LedgerError::Unauthorized(format!(
                "{acting:?} may not act for {expected:?}"
            )));
        }
        Ok(())
    }

    /// Does `account` hold `topic` at the time of this operation?
    pub fn has_claim(&self, account: &Address, topic: ClaimTopic) -> bool {
        self.claims.has_valid_claim(account, topic, self.now)
    }

    /// Requires `account` to hold `topic`, failing with `Unauthorized`.
    pub fn require_role(&self, account: &Address, topic: ClaimTopic) -> LedgerResult<()> {
        if self.has_claim(account, topic) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized(format!(
                "{account:?} lacks role claim {topic}"
            )))
        }
    }
}
