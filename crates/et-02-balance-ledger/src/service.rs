//! # Balance Ledger Service
//!
//! Owns the balance and approval tables and implements every operation on
//! them. Each mutating operation:
//!
//! 1. authorizes the caller through the claims gateway,
//! 2. stages all of its writes in `StagedWrites`, checking as it goes,
//! 3. applies the finished `CommitPlan`.
//!
//! A failure in step 1 or 2 returns before anything is written.

use crate::domain::{
    check_recipient, ApprovalBook, ApprovalKey, BalanceBook, CommitPlan, ReceptionApproval,
    StagedWrites, TransferPolicy,
};
use crate::ports::SeriesDirectory;
use et_01_token_codec::decode;
use shared_types::{
    Address, CallContext, ClaimTopic, ExecutionEnv, LedgerError, LedgerResult, Timestamp,
    TokenId, U256,
};
use tracing::{debug, warn};

/// The multi-asset balance ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceLedger {
    balances: BalanceBook,
    approvals: ApprovalBook,
    policy: TransferPolicy,
}

impl BalanceLedger {
    /// Creates an empty ledger.
    pub fn new(policy: TransferPolicy) -> Self {
        Self {
            balances: BalanceBook::new(),
            approvals: ApprovalBook::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &TransferPolicy {
        &self.policy
    }

    pub fn balances(&self) -> &BalanceBook {
        &self.balances
    }

    pub fn approvals(&self) -> &ApprovalBook {
        &self.approvals
    }

    // === Reads ===

    /// Balance of `account` in `token_id`; zero for unseen pairs.
    pub fn balance_of(&self, account: &Address, token_id: &TokenId) -> U256 {
        self.balances.get(account, token_id)
    }

    /// Pairwise balances, in input order.
    pub fn balance_of_batch(
        &self,
        accounts: &[Address],
        token_ids: &[TokenId],
    ) -> LedgerResult<Vec<U256>> {
        check_lengths(accounts.len(), token_ids.len())?;
        Ok(accounts
            .iter()
            .zip(token_ids)
            .map(|(account, token_id)| self.balances.get(account, token_id))
            .collect())
    }

    /// Outstanding supply of `token_id`, summed over all holders.
    pub fn total_supply(&self, token_id: &TokenId) -> U256 {
        self.balances.total_supply(token_id)
    }

    pub fn reception_approval(
        &self,
        approver: &Address,
        sender: &Address,
        token_id: &TokenId,
    ) -> Option<ReceptionApproval> {
        self.approvals.get(&ApprovalKey {
            approver: *approver,
            sender: *sender,
            token_id: *token_id,
        })
    }

    // === Approvals ===

    /// Lets `sender` push up to `max_quantity` of `token_id` to `approver`
    /// until `expiry`. Replaces any earlier approval for the same key; an
    /// expiry in the past is stored but never usable.
    #[allow(clippy::too_many_arguments)]
    pub fn approve_reception(
        &mut self,
        env: &ExecutionEnv<'_>,
        ctx: &CallContext,
        approver: Address,
        sender: Address,
        token_id: TokenId,
        max_quantity: U256,
        expiry: Timestamp,
    ) -> LedgerResult<()> {
        env.require_acting_as(ctx, &approver)?;
        decode(&token_id)?;

        self.approvals.put(
            ApprovalKey {
                approver,
                sender,
                token_id,
            },
            ReceptionApproval {
                remaining: max_quantity,
                expiry,
            },
        );
        debug!(
            approver = ?approver,
            sender = ?sender,
            token_id = %token_id,
            max_quantity = %max_quantity,
            expiry,
            "Reception approval set"
        );
        Ok(())
    }

    // === Transfers ===

    /// Moves `quantity` of `token_id` from `from` to `to`.
    pub fn transfer(
        &mut self,
        env: &ExecutionEnv<'_>,
        ctx: &CallContext,
        from: Address,
        to: Address,
        token_id: TokenId,
        quantity: U256,
    ) -> LedgerResult<()> {
        self.batch_transfer(env, ctx, from, to, &[token_id], &[quantity])
    }

    /// Moves several tokens from `from` to `to`, all or nothing.
    ///
    /// Items are checked in order; each sees the balances and approvals left
    /// by the items before it.
    pub fn batch_transfer(
        &mut self,
        env: &ExecutionEnv<'_>,
        ctx: &CallContext,
        from: Address,
        to: Address,
        token_ids: &[TokenId],
        quantities: &[U256],
    ) -> LedgerResult<()> {
        check_lengths(token_ids.len(), quantities.len())?;
        self.check_batch_len(token_ids.len())?;
        env.require_acting_as(ctx, &from)?;

        let plan = {
            let mut staged = StagedWrites::new(&self.balances, &self.approvals);
            for (token_id, quantity) in token_ids.iter().zip(quantities) {
                if let Err(e) =
                    stage_transfer(&self.policy, &mut staged, env, &from, &to, token_id, *quantity)
                {
                    debug!(from = ?from, to = ?to, token_id = %token_id, error = %e, "Transfer rejected");
                    return Err(e);
                }
            }
            staged.into_plan()
        };
        self.commit(plan);

        debug!(from = ?from, to = ?to, items = token_ids.len(), "Transfer committed");
        Ok(())
    }

    // === Minting ===

    /// Creates new units of `token_id` for `recipients`.
    ///
    /// - Forwards: only the series' reference account, once the series exists.
    /// - Certificates: only metering authorities.
    ///
    /// Recipients must be eligible for the kind; no reception approval is
    /// needed. Returns the total minted.
    pub fn mint(
        &mut self,
        env: &ExecutionEnv<'_>,
        series: &dyn SeriesDirectory,
        ctx: &CallContext,
        token_id: TokenId,
        recipients: &[Address],
        quantities: &[U256],
    ) -> LedgerResult<U256> {
        check_lengths(recipients.len(), quantities.len())?;
        self.check_batch_len(recipients.len())?;

        let descriptor = decode(&token_id)?;
        let acting = env.acting_account(ctx)?;
        if descriptor.kind.is_forward() {
            if acting != descriptor.account {
                warn!(acting = ?acting, token_id = %token_id, "Forward mint by non-issuer rejected");
                return Err(LedgerError::Unauthorized(format!(
                    "only {:?} may mint forwards of its own series",
                    descriptor.account
                )));
            }
            if !series.is_issued(&token_id) {
                return Err(LedgerError::SeriesNotFound(token_id));
            }
        } else {
            env.require_role(&acting, ClaimTopic::IS_METERING_AUTHORITY)?;
        }

        let minted = quantities.iter().try_fold(U256::zero(), |acc, q| {
            acc.checked_add(*q).ok_or(LedgerError::ArithmeticOverflow)
        })?;
        self.total_supply(&token_id)
            .checked_add(minted)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        let plan = {
            let mut staged = StagedWrites::new(&self.balances, &self.approvals);
            for (recipient, quantity) in recipients.iter().zip(quantities) {
                check_recipient(env, recipient, descriptor.kind)?;
                staged.credit(recipient, &token_id, *quantity)?;
            }
            staged.into_plan()
        };
        self.commit(plan);

        debug!(
            minter = ?acting,
            token_id = %token_id,
            recipients = recipients.len(),
            minted = %minted,
            "Mint committed"
        );
        Ok(minted)
    }

    // === Issuance & settlement (Subsystems 4 and 5) ===

    /// Credits `quantity` without authorization, eligibility or approval
    /// checks. Used for the issuer's own stake at series creation.
    pub fn issue(&mut self, to: &Address, token_id: &TokenId, quantity: U256) -> LedgerResult<()> {
        self.total_supply(token_id)
            .checked_add(quantity)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let plan = {
            let mut staged = StagedWrites::new(&self.balances, &self.approvals);
            staged.credit(to, token_id, quantity)?;
            staged.into_plan()
        };
        self.commit(plan);
        Ok(())
    }

    /// Moves `quantity` from `from` to `to` as a settlement payout: the
    /// recipient must be eligible, but no reception approval is consumed.
    pub fn settle(
        &mut self,
        env: &ExecutionEnv<'_>,
        from: &Address,
        to: &Address,
        token_id: &TokenId,
        quantity: U256,
    ) -> LedgerResult<()> {
        let kind = decode(token_id)?.kind;
        let plan = {
            let mut staged = StagedWrites::new(&self.balances, &self.approvals);
            staged.debit(from, token_id, quantity)?;
            check_recipient(env, to, kind)?;
            staged.credit(to, token_id, quantity)?;
            staged.into_plan()
        };
        self.commit(plan);
        Ok(())
    }

    fn check_batch_len(&self, len: usize) -> LedgerResult<()> {
        if len > self.policy.max_batch_len {
            return Err(LedgerError::BatchTooLarge {
                len,
                max: self.policy.max_batch_len,
            });
        }
        Ok(())
    }

    fn commit(&mut self, plan: CommitPlan) {
        plan.apply(&mut self.balances, &mut self.approvals);
    }
}

/// Stages one transfer item. Check order matters: balance, eligibility,
/// approval. A self-transfer gets no implicit approval.
fn stage_transfer(
    policy: &TransferPolicy,
    staged: &mut StagedWrites<'_>,
    env: &ExecutionEnv<'_>,
    from: &Address,
    to: &Address,
    token_id: &TokenId,
    quantity: U256,
) -> LedgerResult<()> {
    let available = staged.balance(from, token_id);
    if quantity > available {
        return Err(LedgerError::InsufficientBalance {
            required: quantity,
            available,
        });
    }

    let kind = decode(token_id)?.kind;
    check_recipient(env, to, kind)?;

    if policy.requires_approval(kind) {
        let key = ApprovalKey {
            approver: *to,
            sender: *from,
            token_id: *token_id,
        };
        staged.consume_approval(&key, quantity, env.now)?;
    }

    staged.debit(from, token_id, quantity)?;
    staged.credit(to, token_id, quantity)
}

fn check_lengths(left: usize, right: usize) -> LedgerResult<()> {
    if left == right {
        Ok(())
    } else {
        Err(LedgerError::LengthMismatch { left, right })
    }
}
