//! # In-Memory Identity Registry
//!
//! Adapters for the driven ports, used by the runtime and by tests.
//! Production deployments would back `ClaimsGateway` with a real identity /
//! claims service; signature checking is out of scope here.

use crate::claims::ClaimTopic;
use crate::entities::{Address, Timestamp};
use crate::ports::{CallContext, ClaimsGateway, Clock};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

// =============================================================================
// CLOCKS
// =============================================================================

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Manually driven clock for deterministic replays and tests.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicU64,
}

impl FixedClock {
    /// Creates a clock stopped at `now`.
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Moves the clock forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}

// =============================================================================
// CLAIMS REGISTRY
// =============================================================================

/// In-memory identity and claims registry.
///
/// - Identities are registered with the key that controls them.
/// - Claims are held per (identity, topic) with an expiry; a claim is valid
///   at `at` while `at < expiry`. The registry keeps no clock of its own.
#[derive(Default)]
pub struct InMemoryClaimsRegistry {
    /// identity -> controlling key
    identities: RwLock<BTreeMap<Address, Address>>,
    /// (subject, topic) -> expiry
    claims: RwLock<BTreeMap<(Address, ClaimTopic), Timestamp>>,
}

impl InMemoryClaimsRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `identity` as controlled by `owner_key`, replacing any
    /// previous owner.
    pub fn register_identity(&self, identity: Address, owner_key: Address) {
        debug!(identity = ?identity, owner = ?owner_key, "Identity registered");
        self.identities.write().insert(identity, owner_key);
    }

    /// Key controlling `identity`, if registered.
    pub fn owner_of(&self, identity: &Address) -> Option<Address> {
        self.identities.read().get(identity).copied()
    }

    /// Adds (or renews) a claim of `topic` on `subject`, valid until `expiry`.
    pub fn add_claim(&self, subject: Address, topic: ClaimTopic, expiry: Timestamp) {
        debug!(subject = ?subject, topic = %topic, expiry, "Claim added");
        self.claims.write().insert((subject, topic), expiry);
    }

    /// Adds several topics with the same expiry.
    pub fn add_claims(&self, subject: Address, topics: &[ClaimTopic], expiry: Timestamp) {
        let mut claims = self.claims.write();
        for topic in topics {
            claims.insert((subject, *topic), expiry);
        }
    }

    /// Removes a claim. Returns whether it existed.
    pub fn revoke_claim(&self, subject: &Address, topic: ClaimTopic) -> bool {
        self.claims.write().remove(&(*subject, topic)).is_some()
    }
}

impl ClaimsGateway for InMemoryClaimsRegistry {
    fn has_valid_claim(&self, account: &Address, topic: ClaimTopic, at: Timestamp) -> bool {
        self.claims
            .read()
            .get(&(*account, topic))
            .is_some_and(|expiry| at < *expiry)
    }

    fn acting_account(&self, ctx: &CallContext) -> Option<Address> {
        let identity = ctx.via_identity?;
        let owner = self.identities.read().get(&identity).copied()?;
        (owner == ctx.signer).then_some(identity)
    }
}
