//! # Reception Approval Store
//!
//! Approvals are keyed `(approver, sender, token id)`. A new approval for the
//! same key overwrites the old one; transfers decrement `remaining` and leave
//! the row in place once exhausted.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp, TokenId, U256};
use std::collections::BTreeMap;

/// Key of the approval table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApprovalKey {
    /// Recipient granting the approval.
    pub approver: Address,
    /// Account allowed to push tokens.
    pub sender: Address,
    pub token_id: TokenId,
}

/// Remaining quantity `sender` may still push to `approver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceptionApproval {
    pub remaining: U256,
    /// Unix time at which the approval stops being usable.
    pub expiry: Timestamp,
}

impl ReceptionApproval {
    pub fn is_active(&self, now: Timestamp) -> bool {
        now < self.expiry
    }

    /// Quantity usable at `now`; zero once expired.
    pub fn usable(&self, now: Timestamp) -> U256 {
        if self.is_active(now) {
            self.remaining
        } else {
            U256::zero()
        }
    }
}

/// One row of the approval table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalEntry {
    pub approver: Address,
    pub sender: Address,
    pub token_id: TokenId,
    pub remaining: U256,
    pub expiry: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalBook {
    entries: BTreeMap<ApprovalKey, ReceptionApproval>,
}

impl ApprovalBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ApprovalKey) -> Option<ReceptionApproval> {
        self.entries.get(key).copied()
    }

    pub(crate) fn put(&mut self, key: ApprovalKey, approval: ReceptionApproval) {
        self.entries.insert(key, approval);
    }

    /// Overwrites `remaining`, keeping the expiry. No-op for unknown keys.
    pub(crate) fn set_remaining(&mut self, key: &ApprovalKey, remaining: U256) {
        if let Some(approval) = self.entries.get_mut(key) {
            approval.remaining = remaining;
        }
    }

    pub fn entries(&self) -> Vec<ApprovalEntry> {
        self.entries
            .iter()
            .map(|(key, approval)| ApprovalEntry {
                approver: key.approver,
                sender: key.sender,
                token_id: key.token_id,
                remaining: approval.remaining,
                expiry: approval.expiry,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
