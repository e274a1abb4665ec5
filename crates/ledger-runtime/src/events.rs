//! # Event Journal
//!
//! Every committed mutation appends one or more events. Failed operations
//! append nothing. Mints and payouts appear as `TransferSingle` from the zero
//! address or the distributor respectively.

use et_01_token_codec::TokenKind;
use et_03_energy_documentation::EnergyDirection;
use serde::{Deserialize, Serialize};
use shared_types::{Address, SettlementPeriod, Timestamp, TokenId, U256};
use tracing::info;

/// A committed state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    TransferSingle {
        operator: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
        quantity: U256,
    },
    TransferBatch {
        operator: Address,
        from: Address,
        to: Address,
        token_ids: Vec<TokenId>,
        quantities: Vec<U256>,
    },
    ReceptionApproved {
        approver: Address,
        sender: Address,
        token_id: TokenId,
        max_quantity: U256,
        expiry: Timestamp,
    },
    ForwardSeriesCreated {
        token_id: TokenId,
        kind: TokenKind,
        period: SettlementPeriod,
        reference_account: Address,
        distributor: Address,
    },
    EnergyDocumented {
        account: Address,
        period: SettlementPeriod,
        value: U256,
        is_corrected: bool,
        direction: EnergyDirection,
        attesting_authority: Address,
    },
    Distributed {
        recipient: Address,
        forward_id: TokenId,
        certificate_id: TokenId,
        entitlement: U256,
        paid: U256,
    },
}

impl LedgerEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TransferSingle { .. } => "transfer_single",
            Self::TransferBatch { .. } => "transfer_batch",
            Self::ReceptionApproved { .. } => "reception_approved",
            Self::ForwardSeriesCreated { .. } => "forward_series_created",
            Self::EnergyDocumented { .. } => "energy_documented",
            Self::Distributed { .. } => "distributed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedEvent {
    /// Starts at 1, increases by one per event.
    pub sequence: u64,
    pub event: LedgerEvent,
}

/// Append-only event log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventJournal {
    events: Vec<SequencedEvent>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, event: LedgerEvent) -> u64 {
        let sequence = self.events.len() as u64 + 1;
        info!(sequence, event = event.name(), "Ledger event");
        self.events.push(SequencedEvent { sequence, event });
        sequence
    }

    pub fn events(&self) -> &[SequencedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
