//! # Series Registry Service

use crate::domain::{ForwardSeries, IssuanceConfig};
use et_01_token_codec::{encode, TokenKind};
use et_02_balance_ledger::{BalanceLedger, SeriesDirectory};
use shared_types::{
    Address, CallContext, ExecutionEnv, LedgerError, LedgerResult, SettlementPeriod, TokenId,
};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// All issued forward series, keyed by token id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesRegistry {
    series: BTreeMap<TokenId, ForwardSeries>,
    config: IssuanceConfig,
}

impl SeriesRegistry {
    pub fn new(config: IssuanceConfig) -> Self {
        Self {
            series: BTreeMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &IssuanceConfig {
        &self.config
    }

    pub fn get(&self, token_id: &TokenId) -> Option<ForwardSeries> {
        self.series.get(token_id).copied()
    }

    pub fn exists(&self, token_id: &TokenId) -> bool {
        self.series.contains_key(token_id)
    }

    /// Creates the forward series `(kind, period, reference_account)`.
    ///
    /// For a generation-based series the issuer's stake is credited in the
    /// same step; if that fails the series is not registered.
    ///
    /// # Errors
    ///
    /// - `InvalidForwardKind` for `Certificate`
    /// - `Unauthorized` unless acting as `reference_account`
    /// - `SeriesAlreadyExists` on the second creation
    #[allow(clippy::too_many_arguments)]
    pub fn create_forward_series(
        &mut self,
        env: &ExecutionEnv<'_>,
        ctx: &CallContext,
        ledger: &mut BalanceLedger,
        period: SettlementPeriod,
        kind: TokenKind,
        reference_account: Address,
        distributor: Address,
    ) -> LedgerResult<ForwardSeries> {
        if !kind.is_forward() {
            return Err(LedgerError::InvalidForwardKind { code: kind.code() });
        }
        env.require_acting_as(ctx, &reference_account)?;

        let token_id = encode(kind, period, &reference_account);
        if self.exists(&token_id) {
            warn!(token_id = %token_id, "Forward series already issued");
            return Err(LedgerError::SeriesAlreadyExists(token_id));
        }

        if kind == TokenKind::GenerationBasedForward {
            ledger.issue(
                &reference_account,
                &token_id,
                self.config.generation_forward_stake(),
            )?;
        }

        let series = ForwardSeries {
            token_id,
            kind,
            period,
            reference_account,
            distributor,
        };
        self.series.insert(token_id, series);
        info!(
            token_id = %token_id,
            kind = %kind,
            period,
            reference_account = ?reference_account,
            distributor = ?distributor,
            "Forward series created"
        );
        Ok(series)
    }

    /// All series in token id order.
    pub fn entries(&self) -> Vec<ForwardSeries> {
        self.series.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl SeriesDirectory for SeriesRegistry {
    fn is_issued(&self, token_id: &TokenId) -> bool {
        self.exists(token_id)
    }
}
