//! # Energy Ledger Service
//!
//! The single entry point to the ledger. Holds all state behind one
//! `RwLock`: every mutation takes the write lock for its whole duration, so
//! conflicting operations are globally ordered and a failed operation leaves
//! no trace.
//!
//! ## Security
//!
//! - Every mutation (except `distribute`) carries a `CallContext`; the acting
//!   account is resolved through the injected `ClaimsGateway`.
//! - The gateway is only read while the lock is held.

use crate::container::{LedgerConfig, LedgerState};
use crate::errors::RuntimeError;
use crate::events::{LedgerEvent, SequencedEvent};
use crate::snapshot::LedgerSnapshot;
use et_01_token_codec::{encode, TokenKind};
use et_02_balance_ledger::ReceptionApproval;
use et_03_energy_documentation::EnergyDocumentation;
use et_04_forward_issuance::ForwardSeries;
use et_05_distribution::{DistributionOutcome, SettlementState};
use parking_lot::{Mutex, RwLock};
use shared_types::{
    Address, CallContext, ClaimsGateway, Clock, ExecutionEnv, LedgerResult, SettlementPeriod,
    Timestamp, TokenId, U256,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Operation counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LedgerStats {
    /// Mutations that committed.
    pub committed: u64,
    /// Mutations that failed and were rolled back.
    pub rejected: u64,
}

/// The energy-token ledger service.
pub struct EnergyLedger {
    state: RwLock<LedgerState>,
    claims: Arc<dyn ClaimsGateway>,
    clock: Arc<dyn Clock>,
    config: LedgerConfig,
    stats: Mutex<LedgerStats>,
}

impl EnergyLedger {
    /// Creates an empty ledger.
    pub fn new(config: LedgerConfig, claims: Arc<dyn ClaimsGateway>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(LedgerState::new(&config)),
            claims,
            clock,
            config,
            stats: Mutex::new(LedgerStats::default()),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn stats(&self) -> LedgerStats {
        self.stats.lock().clone()
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn get_token_id(&self, kind: TokenKind, period: SettlementPeriod, account: &Address) -> TokenId {
        encode(kind, period, account)
    }

    pub fn kind_to_code(&self, kind: TokenKind) -> u8 {
        et_01_token_codec::kind_to_code(kind)
    }

    pub fn code_to_kind(&self, code: u8) -> LedgerResult<TokenKind> {
        et_01_token_codec::code_to_kind(code)
    }

    pub fn balance_of(&self, account: &Address, token_id: &TokenId) -> U256 {
        self.state.read().balances.balance_of(account, token_id)
    }

    pub fn balance_of_batch(
        &self,
        accounts: &[Address],
        token_ids: &[TokenId],
    ) -> LedgerResult<Vec<U256>> {
        self.state.read().balances.balance_of_batch(accounts, token_ids)
    }

    pub fn total_supply(&self, token_id: &TokenId) -> U256 {
        self.state.read().balances.total_supply(token_id)
    }

    pub fn energy_documentation(
        &self,
        account: &Address,
        period: SettlementPeriod,
    ) -> Option<EnergyDocumentation> {
        self.state.read().documentation.get(account, period)
    }

    pub fn reception_approval(
        &self,
        approver: &Address,
        sender: &Address,
        token_id: &TokenId,
    ) -> Option<ReceptionApproval> {
        self.state
            .read()
            .balances
            .reception_approval(approver, sender, token_id)
    }

    pub fn series(&self, token_id: &TokenId) -> Option<ForwardSeries> {
        self.state.read().series.get(token_id)
    }

    pub fn settlement(&self, recipient: &Address, forward_id: &TokenId) -> SettlementState {
        self.state
            .read()
            .distribution
            .settlements()
            .state(recipient, forward_id)
    }

    /// All journal events so far, oldest first.
    pub fn events(&self) -> Vec<SequencedEvent> {
        self.state.read().journal.events().to_vec()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.read().snapshot()
    }

    pub fn state_digest(&self) -> Result<[u8; 32], RuntimeError> {
        self.snapshot().state_digest()
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    #[instrument(skip(self, ctx))]
    pub fn approve_reception(
        &self,
        ctx: &CallContext,
        approver: Address,
        sender: Address,
        token_id: TokenId,
        max_quantity: U256,
        expiry: Timestamp,
    ) -> LedgerResult<()> {
        self.mutate("approve_reception", |state, env| {
            state.balances.approve_reception(
                env,
                ctx,
                approver,
                sender,
                token_id,
                max_quantity,
                expiry,
            )?;
            state.journal.append(LedgerEvent::ReceptionApproved {
                approver,
                sender,
                token_id,
                max_quantity,
                expiry,
            });
            Ok(())
        })
    }

    #[instrument(skip(self, ctx))]
    pub fn transfer(
        &self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        token_id: TokenId,
        quantity: U256,
    ) -> LedgerResult<()> {
        self.mutate("transfer", |state, env| {
            state
                .balances
                .transfer(env, ctx, from, to, token_id, quantity)?;
            state.journal.append(LedgerEvent::TransferSingle {
                operator: from,
                from,
                to,
                token_id,
                quantity,
            });
            Ok(())
        })
    }

    #[instrument(skip(self, ctx, token_ids, quantities), fields(items = token_ids.len()))]
    pub fn batch_transfer(
        &self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        token_ids: &[TokenId],
        quantities: &[U256],
    ) -> LedgerResult<()> {
        self.mutate("batch_transfer", |state, env| {
            state
                .balances
                .batch_transfer(env, ctx, from, to, token_ids, quantities)?;
            state.journal.append(LedgerEvent::TransferBatch {
                operator: from,
                from,
                to,
                token_ids: token_ids.to_vec(),
                quantities: quantities.to_vec(),
            });
            Ok(())
        })
    }

    /// Mints `token_id` to `recipients`; returns the total minted.
    #[instrument(skip(self, ctx, recipients, quantities), fields(recipients = recipients.len()))]
    pub fn mint(
        &self,
        ctx: &CallContext,
        token_id: TokenId,
        recipients: &[Address],
        quantities: &[U256],
    ) -> LedgerResult<U256> {
        self.mutate("mint", |state, env| {
            let minted = state.balances.mint(
                env,
                &state.series,
                ctx,
                token_id,
                recipients,
                quantities,
            )?;
            let operator = env.acting_account(ctx)?;
            for (to, quantity) in recipients.iter().zip(quantities) {
                state.journal.append(LedgerEvent::TransferSingle {
                    operator,
                    from: Address::ZERO,
                    to: *to,
                    token_id,
                    quantity: *quantity,
                });
            }
            Ok(minted)
        })
    }

    #[instrument(skip(self, ctx))]
    pub fn create_forward_series(
        &self,
        ctx: &CallContext,
        period: SettlementPeriod,
        kind: TokenKind,
        reference_account: Address,
        distributor: Address,
    ) -> LedgerResult<ForwardSeries> {
        self.mutate("create_forward_series", |state, env| {
            let series = state.series.create_forward_series(
                env,
                ctx,
                &mut state.balances,
                period,
                kind,
                reference_account,
                distributor,
            )?;
            if kind == TokenKind::GenerationBasedForward {
                state.journal.append(LedgerEvent::TransferSingle {
                    operator: reference_account,
                    from: Address::ZERO,
                    to: reference_account,
                    token_id: series.token_id,
                    quantity: state.series.config().generation_forward_stake(),
                });
            }
            state.journal.append(LedgerEvent::ForwardSeriesCreated {
                token_id: series.token_id,
                kind,
                period,
                reference_account,
                distributor,
            });
            Ok(series)
        })
    }

    #[instrument(skip(self, ctx))]
    pub fn record_measured_generation(
        &self,
        ctx: &CallContext,
        account: Address,
        value: U256,
        period: SettlementPeriod,
        is_corrected: bool,
    ) -> LedgerResult<EnergyDocumentation> {
        self.mutate("record_measured_generation", |state, env| {
            let record = state
                .documentation
                .record_measured_generation(env, ctx, account, value, period, is_corrected)?;
            state.journal.append(documented(account, period, &record));
            Ok(record)
        })
    }

    #[instrument(skip(self, ctx))]
    pub fn record_measured_consumption(
        &self,
        ctx: &CallContext,
        account: Address,
        value: U256,
        period: SettlementPeriod,
        is_corrected: bool,
    ) -> LedgerResult<EnergyDocumentation> {
        self.mutate("record_measured_consumption", |state, env| {
            let record = state
                .documentation
                .record_measured_consumption(env, ctx, account, value, period, is_corrected)?;
            state.journal.append(documented(account, period, &record));
            Ok(record)
        })
    }

    /// Settles `recipient`'s position in `forward_id`. Anyone may trigger a
    /// distribution; the payout always goes to `recipient`.
    #[instrument(skip(self))]
    pub fn distribute(
        &self,
        recipient: Address,
        forward_id: TokenId,
    ) -> LedgerResult<DistributionOutcome> {
        self.mutate("distribute", |state, env| {
            let outcome = state.distribution.distribute(
                env,
                &mut state.balances,
                &state.series,
                &state.documentation,
                recipient,
                forward_id,
            )?;
            if !outcome.paid.is_zero() {
                if let Some(series) = state.series.get(&forward_id) {
                    state.journal.append(LedgerEvent::TransferSingle {
                        operator: series.distributor,
                        from: series.distributor,
                        to: recipient,
                        token_id: outcome.certificate_id,
                        quantity: outcome.paid,
                    });
                }
            }
            state.journal.append(LedgerEvent::Distributed {
                recipient,
                forward_id,
                certificate_id: outcome.certificate_id,
                entitlement: outcome.entitlement,
                paid: outcome.paid,
            });
            Ok(outcome)
        })
    }

    /// Runs `op` under the write lock with a fresh execution environment.
    fn mutate<T>(
        &self,
        name: &'static str,
        op: impl FnOnce(&mut LedgerState, &ExecutionEnv<'_>) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let mut state = self.state.write();
        let env = ExecutionEnv::new(self.claims.as_ref(), self.clock.as_ref());
        let result = op(&mut *state, &env);

        let mut stats = self.stats.lock();
        match &result {
            Ok(_) => {
                stats.committed += 1;
                debug!(op = name, now = env.now, "Operation committed");
            }
            Err(e) => {
                stats.rejected += 1;
                warn!(op = name, error = %e, "Operation rejected");
            }
        }
        result
    }
}

fn documented(account: Address, period: SettlementPeriod, record: &EnergyDocumentation) -> LedgerEvent {
    LedgerEvent::EnergyDocumented {
        account,
        period,
        value: record.value,
        is_corrected: record.is_corrected,
        direction: record.direction,
        attesting_authority: record.attesting_authority,
    }
}
