//! # Documentation Store Service

use crate::domain::{check_overwrite, DocumentationEntry, EnergyDirection, EnergyDocumentation};
use shared_types::{
    Address, CallContext, ClaimTopic, ExecutionEnv, LedgerResult, SettlementPeriod, U256,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Metered readings keyed by `(account, period)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentationStore {
    records: BTreeMap<(Address, SettlementPeriod), EnergyDocumentation>,
}

impl DocumentationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reading on file, if any.
    pub fn get(&self, account: &Address, period: SettlementPeriod) -> Option<EnergyDocumentation> {
        self.records.get(&(*account, period)).copied()
    }

    /// Documented generation of `account` in `period`; zero when absent or
    /// when the reading on file is a consumption reading.
    pub fn generation(&self, account: &Address, period: SettlementPeriod) -> U256 {
        self.get(account, period)
            .map(|record| record.generation())
            .unwrap_or_default()
    }

    /// Documented consumption of `account` in `period`; zero when absent or
    /// when the reading on file is a generation reading.
    pub fn consumption(&self, account: &Address, period: SettlementPeriod) -> U256 {
        self.get(account, period)
            .map(|record| record.consumption())
            .unwrap_or_default()
    }

    /// Writes a reading attested by the acting metering authority.
    ///
    /// Returns the record as stored.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &mut self,
        env: &ExecutionEnv<'_>,
        ctx: &CallContext,
        account: Address,
        period: SettlementPeriod,
        value: U256,
        is_corrected: bool,
        direction: EnergyDirection,
    ) -> LedgerResult<EnergyDocumentation> {
        let authority = env.acting_account(ctx)?;
        env.require_role(&authority, ClaimTopic::IS_METERING_AUTHORITY)?;

        let key = (account, period);
        if let Err(e) = check_overwrite(self.records.get(&key), is_corrected, &account, period) {
            warn!(account = ?account, period, value = %value, "Provisional reading after correction rejected");
            return Err(e);
        }

        let record = EnergyDocumentation {
            value,
            is_corrected,
            attesting_authority: authority,
            direction,
        };
        let previous = self.records.insert(key, record);
        debug!(
            account = ?account,
            period,
            value = %value,
            is_corrected,
            direction = %direction,
            replaced = previous.is_some(),
            "Energy documented"
        );
        Ok(record)
    }

    /// Records a generation reading for `account`.
    pub fn record_measured_generation(
        &mut self,
        env: &ExecutionEnv<'_>,
        ctx: &CallContext,
        account: Address,
        value: U256,
        period: SettlementPeriod,
        is_corrected: bool,
    ) -> LedgerResult<EnergyDocumentation> {
        self.record(
            env,
            ctx,
            account,
            period,
            value,
            is_corrected,
            EnergyDirection::Generation,
        )
    }

    /// Records a consumption reading for `account`.
    pub fn record_measured_consumption(
        &mut self,
        env: &ExecutionEnv<'_>,
        ctx: &CallContext,
        account: Address,
        value: U256,
        period: SettlementPeriod,
        is_corrected: bool,
    ) -> LedgerResult<EnergyDocumentation> {
        self.record(
            env,
            ctx,
            account,
            period,
            value,
            is_corrected,
            EnergyDirection::Consumption,
        )
    }

    /// All readings, ordered by `(account, period)`.
    pub fn entries(&self) -> Vec<DocumentationEntry> {
        self.records
            .iter()
            .map(|((account, period), record)| DocumentationEntry::new(*account, *period, record))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
