//! # Ledger State
//!
//! The one state object shared by all operations: every subsystem's tables
//! plus the event journal. Only `EnergyLedger` holds it, behind its lock.

use crate::container::config::LedgerConfig;
use crate::events::EventJournal;
use crate::snapshot::LedgerSnapshot;
use et_02_balance_ledger::BalanceLedger;
use et_03_energy_documentation::DocumentationStore;
use et_04_forward_issuance::SeriesRegistry;
use et_05_distribution::DistributionEngine;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    pub balances: BalanceLedger,
    pub documentation: DocumentationStore,
    pub series: SeriesRegistry,
    pub distribution: DistributionEngine,
    pub journal: EventJournal,
}

impl LedgerState {
    /// Empty state with the subsystems configured from `config`.
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            balances: BalanceLedger::new(config.transfers.clone()),
            documentation: DocumentationStore::new(),
            series: SeriesRegistry::new(config.issuance.clone()),
            distribution: DistributionEngine::new(),
            journal: EventJournal::new(),
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            balances: self.balances.balances().entries(),
            approvals: self.balances.approvals().entries(),
            documentation: self.documentation.entries(),
            series: self.series.entries(),
            settlements: self.distribution.settlements().entries(),
            event_count: self.journal.len() as u64,
        }
    }
}
