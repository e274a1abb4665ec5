//! # Settlement Book
//!
//! What has already been paid out per `(recipient, forward id)`.
//!
//! The settled amount tracks certificates the recipient still holds from
//! this position. Certificates handed back to the distributor stop
//! counting, so a later call pays the full entitlement again.

use serde::{Deserialize, Serialize};
use shared_types::{Address, TokenId, U256};
use std::collections::BTreeMap;

/// Settlement progress of one `(recipient, forward id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementState {
    Uninitialized,
    Settled(U256),
}

impl SettlementState {
    /// Certificates paid so far.
    pub fn amount(&self) -> U256 {
        match self {
            Self::Uninitialized => U256::zero(),
            Self::Settled(amount) => *amount,
        }
    }
}

/// One row of the settlement table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementEntry {
    pub recipient: Address,
    pub forward_id: TokenId,
    pub settled: U256,
}

/// Result of one `distribute` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionOutcome {
    pub recipient: Address,
    pub forward_id: TokenId,
    pub certificate_id: TokenId,
    /// Total certificates the current position is worth.
    pub entitlement: U256,
    /// Settled amount before this call.
    pub previously_settled: U256,
    /// Part of `previously_settled` the recipient still held.
    pub still_held: U256,
    /// Certificates moved by this call.
    pub paid: U256,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementBook {
    settled: BTreeMap<(Address, TokenId), U256>,
}

impl SettlementBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, recipient: &Address, forward_id: &TokenId) -> SettlementState {
        self.settled
            .get(&(*recipient, *forward_id))
            .map_or(SettlementState::Uninitialized, |amount| {
                SettlementState::Settled(*amount)
            })
    }

    /// Stores `settled` as the amount paid out and still held.
    pub(crate) fn record(&mut self, recipient: Address, forward_id: TokenId, settled: U256) {
        self.settled.insert((recipient, forward_id), settled);
    }

    pub fn entries(&self) -> Vec<SettlementEntry> {
        self.settled
            .iter()
            .map(|((recipient, forward_id), settled)| SettlementEntry {
                recipient: *recipient,
                forward_id: *forward_id,
                settled: *settled,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.settled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }
}
