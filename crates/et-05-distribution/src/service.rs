//! # Distribution Engine Service
//!
//! `distribute` reads the recipient's forward position and the period's
//! metered energy, computes the entitlement, and pays any newly due
//! certificates out of the distributor's reserve through the balance
//! ledger's settlement path.
//!
//! Newly due is measured against the certificates from earlier payouts the
//! recipient still holds. Returning them to the distributor and calling
//! again pays the current entitlement in full.

use crate::domain::{entitlement, DistributionOutcome, SettlementBook, SettlementFigures};
use crate::ports::{MeteredEnergySource, SeriesSource};
use et_01_token_codec::{certificate_id_for, decode};
use et_02_balance_ledger::BalanceLedger;
use shared_types::{Address, ClaimTopic, ExecutionEnv, LedgerError, LedgerResult, TokenId};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionEngine {
    settlements: SettlementBook,
}

impl DistributionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settlements(&self) -> &SettlementBook {
        &self.settlements
    }

    /// Settles `recipient`'s position in `forward_id`.
    ///
    /// # Errors
    ///
    /// - `InvalidForwardKind` if `forward_id` is a certificate
    /// - `SeriesNotFound` if the series was never issued
    /// - `Unauthorized` if the series' distributor is not accepted
    /// - `DivisionByUndefinedGeneration` (consumption-based, no generation)
    /// - `InsufficientCertificateReserve` if the distributor cannot pay
    /// - `RecipientNotEligible` if the recipient may not hold certificates
    pub fn distribute(
        &mut self,
        env: &ExecutionEnv<'_>,
        ledger: &mut BalanceLedger,
        series: &dyn SeriesSource,
        energy: &dyn MeteredEnergySource,
        recipient: Address,
        forward_id: TokenId,
    ) -> LedgerResult<DistributionOutcome> {
        let forward = decode(&forward_id)?;
        if !forward.kind.is_forward() {
            return Err(LedgerError::InvalidForwardKind {
                code: forward.kind.code(),
            });
        }
        let distributor = series
            .distributor_of(&forward_id)
            .ok_or(LedgerError::SeriesNotFound(forward_id))?;
        env.require_role(&distributor, ClaimTopic::ACCEPTED_DISTRIBUTOR)?;

        let figures = SettlementFigures {
            balance: ledger.balance_of(&recipient, &forward_id),
            supply: ledger.total_supply(&forward_id),
            generation: energy.generation(&forward.account, forward.period),
            consumption: energy.consumption(&recipient, forward.period),
        };
        let entitlement = entitlement(&forward, &figures)?;
        let certificate_id = certificate_id_for(&forward);
        let previously_settled = self.settlements.state(&recipient, &forward_id).amount();
        // Certificates handed back since the last payout are due again
        let still_held = previously_settled.min(ledger.balance_of(&recipient, &certificate_id));
        let paid = entitlement.saturating_sub(still_held);

        if !paid.is_zero() {
            let reserve = ledger.balance_of(&distributor, &certificate_id);
            if reserve < paid {
                warn!(
                    distributor = ?distributor,
                    certificate_id = %certificate_id,
                    required = %paid,
                    available = %reserve,
                    "Distributor reserve too small"
                );
                return Err(LedgerError::InsufficientCertificateReserve {
                    required: paid,
                    available: reserve,
                });
            }
            ledger.settle(env, &distributor, &recipient, &certificate_id, paid)?;
        }
        self.settlements
            .record(recipient, forward_id, still_held.max(entitlement));

        debug!(?figures, "Settlement figures");
        info!(
            recipient = ?recipient,
            forward_id = %forward_id,
            entitlement = %entitlement,
            still_held = %still_held,
            paid = %paid,
            "Forward distributed"
        );
        Ok(DistributionOutcome {
            recipient,
            forward_id,
            certificate_id,
            entitlement,
            previously_settled,
            still_held,
            paid,
        })
    }
}
