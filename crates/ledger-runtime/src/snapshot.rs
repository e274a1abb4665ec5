//! # State Snapshots
//!
//! An ordered, serializable copy of every table. Two ledgers that went
//! through the same operations produce equal snapshots and equal digests.

use crate::errors::RuntimeError;
use et_02_balance_ledger::{ApprovalEntry, BalanceEntry};
use et_03_energy_documentation::DocumentationEntry;
use et_04_forward_issuance::ForwardSeries;
use et_05_distribution::SettlementEntry;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Ordered by `(account, token id)`; zero balances omitted.
    pub balances: Vec<BalanceEntry>,
    /// Ordered by `(approver, sender, token id)`.
    pub approvals: Vec<ApprovalEntry>,
    /// Ordered by `(account, period)`.
    pub documentation: Vec<DocumentationEntry>,
    /// Ordered by token id.
    pub series: Vec<ForwardSeries>,
    /// Ordered by `(recipient, forward id)`.
    pub settlements: Vec<SettlementEntry>,
    /// Number of journal events so far.
    pub event_count: u64,
}

impl LedgerSnapshot {
    /// Keccak-256 of the bincode encoding.
    pub fn state_digest(&self) -> Result<[u8; 32], RuntimeError> {
        let encoded = bincode::serialize(self)?;
        Ok(Keccak256::digest(&encoded).into())
    }

    /// `0x`-prefixed hex of [`LedgerSnapshot::state_digest`].
    pub fn state_digest_hex(&self) -> Result<String, RuntimeError> {
        Ok(format!("0x{}", hex::encode(self.state_digest()?)))
    }
}
