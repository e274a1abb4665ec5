//! # Staged Writes
//!
//! Every mutation is planned against a read-only view of the tables with its
//! writes buffered here. Later items of a batch see the writes of earlier
//! ones. Nothing reaches the tables until the finished plan is applied, so a
//! failing check anywhere leaves state untouched.

use crate::domain::approvals::{ApprovalBook, ApprovalKey};
use crate::domain::balances::BalanceBook;
use shared_types::{Address, LedgerError, LedgerResult, Timestamp, TokenId, U256};
use std::collections::BTreeMap;

/// Buffered balance and approval writes over borrowed tables.
pub struct StagedWrites<'a> {
    balances: &'a BalanceBook,
    approvals: &'a ApprovalBook,
    balance_writes: BTreeMap<(Address, TokenId), U256>,
    approval_writes: BTreeMap<ApprovalKey, U256>,
}

impl<'a> StagedWrites<'a> {
    pub fn new(balances: &'a BalanceBook, approvals: &'a ApprovalBook) -> Self {
        Self {
            balances,
            approvals,
            balance_writes: BTreeMap::new(),
            approval_writes: BTreeMap::new(),
        }
    }

    /// Balance including staged writes.
    pub fn balance(&self, account: &Address, token_id: &TokenId) -> U256 {
        self.balance_writes
            .get(&(*account, *token_id))
            .copied()
            .unwrap_or_else(|| self.balances.get(account, token_id))
    }

    pub fn debit(&mut self, account: &Address, token_id: &TokenId, quantity: U256) -> LedgerResult<()> {
        let available = self.balance(account, token_id);
        let remaining = available
            .checked_sub(quantity)
            .ok_or(LedgerError::InsufficientBalance {
                required: quantity,
                available,
            })?;
        self.balance_writes.insert((*account, *token_id), remaining);
        Ok(())
    }

    pub fn credit(&mut self, account: &Address, token_id: &TokenId, quantity: U256) -> LedgerResult<()> {
        let updated = self
            .balance(account, token_id)
            .checked_add(quantity)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.balance_writes.insert((*account, *token_id), updated);
        Ok(())
    }

    /// Approved quantity still usable at `now`, including staged consumption.
    pub fn usable_approval(&self, key: &ApprovalKey, now: Timestamp) -> U256 {
        match self.approvals.get(key) {
            Some(approval) if approval.is_active(now) => self
                .approval_writes
                .get(key)
                .copied()
                .unwrap_or(approval.remaining),
            _ => U256::zero(),
        }
    }

    /// Decrements the approval by `quantity`.
    pub fn consume_approval(
        &mut self,
        key: &ApprovalKey,
        quantity: U256,
        now: Timestamp,
    ) -> LedgerResult<()> {
        let approved = self.usable_approval(key, now);
        let remaining = approved
            .checked_sub(quantity)
            .ok_or(LedgerError::ApprovalExceeded {
                requested: quantity,
                approved,
            })?;
        self.approval_writes.insert(*key, remaining);
        Ok(())
    }

    pub fn into_plan(self) -> CommitPlan {
        CommitPlan {
            balances: self
                .balance_writes
                .into_iter()
                .map(|((account, token_id), quantity)| (account, token_id, quantity))
                .collect(),
            approvals: self.approval_writes.into_iter().collect(),
        }
    }
}

/// Writes ready to be applied. Applying cannot fail.
#[derive(Debug, Default)]
pub struct CommitPlan {
    balances: Vec<(Address, TokenId, U256)>,
    approvals: Vec<(ApprovalKey, U256)>,
}

impl CommitPlan {
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty() && self.approvals.is_empty()
    }

    pub(crate) fn apply(self, balances: &mut BalanceBook, approvals: &mut ApprovalBook) {
        for (account, token_id, quantity) in self.balances {
            balances.set(account, token_id, quantity);
        }
        for (key, remaining) in self.approvals {
            approvals.set_remaining(&key, remaining);
        }
    }
}
