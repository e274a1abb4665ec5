//! # Balance Table
//!
//! `(account, token id) -> quantity`. Zero balances are not stored, so two
//! ledgers with the same logical balances compare equal.

use serde::{Deserialize, Serialize};
use shared_types::{Address, TokenId, U256};
use std::collections::BTreeMap;

/// One row of the balance table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub account: Address,
    pub token_id: TokenId,
    pub quantity: U256,
}

/// Balance table keyed by `(account, token id)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceBook {
    entries: BTreeMap<(Address, TokenId), U256>,
}

impl BalanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `account` in `token_id`; zero for unseen pairs.
    pub fn get(&self, account: &Address, token_id: &TokenId) -> U256 {
        self.entries
            .get(&(*account, *token_id))
            .copied()
            .unwrap_or_default()
    }

    /// Sum of all balances of `token_id`.
    ///
    /// Mints are checked against overflow of this sum, so it cannot saturate.
    pub fn total_supply(&self, token_id: &TokenId) -> U256 {
        self.entries
            .iter()
            .filter(|((_, id), _)| id == token_id)
            .fold(U256::zero(), |acc, (_, quantity)| acc.saturating_add(*quantity))
    }

    /// Accounts holding a non-zero balance of `token_id`.
    pub fn holders(&self, token_id: &TokenId) -> Vec<Address> {
        self.entries
            .keys()
            .filter(|(_, id)| id == token_id)
            .map(|(account, _)| *account)
            .collect()
    }

    pub(crate) fn set(&mut self, account: Address, token_id: TokenId, quantity: U256) {
        if quantity.is_zero() {
            self.entries.remove(&(account, token_id));
        } else {
            self.entries.insert((account, token_id), quantity);
        }
    }

    /// Rows in `(account, token id)` order.
    pub fn entries(&self) -> Vec<BalanceEntry> {
        self.entries
            .iter()
            .map(|((account, token_id), quantity)| BalanceEntry {
                account: *account,
                token_id: *token_id,
                quantity: *quantity,
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
