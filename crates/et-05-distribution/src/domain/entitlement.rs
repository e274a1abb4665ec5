//! # Entitlement Rules
//!
//! Pure functions from a forward position and the period's metered energy to
//! the certificate quantity it is worth. All divisions round down; products
//! are taken in 512 bits so no intermediate can overflow.

use et_01_token_codec::{TokenDescriptor, TokenKind};
use primitive_types::U512;
use serde::{Deserialize, Serialize};
use shared_types::{whole_units, LedgerError, LedgerResult, U256};

/// Balance covering all of a recipient's consumption: 100 whole units.
pub fn full_share() -> U256 {
    whole_units(100)
}

/// Inputs to one entitlement computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementFigures {
    /// Recipient's forward balance (`B`).
    pub balance: U256,
    /// Outstanding supply of the forward (`S`).
    pub supply: U256,
    /// Generation documented for the reference site (`G`).
    pub generation: U256,
    /// Consumption documented for the recipient (`C`).
    pub consumption: U256,
}

/// Certificates owed for `forward` given `figures`.
///
/// # Errors
///
/// - `InvalidForwardKind` for certificates
/// - `DivisionByUndefinedGeneration` for a consumption-based forward with no
///   documented generation
/// - `ArithmeticOverflow` if the result does not fit 256 bits
pub fn entitlement(forward: &TokenDescriptor, figures: &SettlementFigures) -> LedgerResult<U256> {
    let SettlementFigures {
        balance,
        supply,
        generation,
        consumption,
    } = *figures;

    match forward.kind {
        TokenKind::AbsoluteForward => {
            if supply <= generation {
                Ok(balance)
            } else {
                mul_div(balance, generation, supply)
            }
        }
        TokenKind::GenerationBasedForward => {
            if supply.is_zero() || generation.is_zero() {
                Ok(U256::zero())
            } else {
                mul_div(balance, generation, supply)
            }
        }
        TokenKind::ConsumptionBasedForward => {
            if generation.is_zero() {
                return Err(LedgerError::DivisionByUndefinedGeneration {
                    account: forward.account,
                    period: forward.period,
                });
            }
            mul_div(balance, consumption.min(generation), full_share())
        }
        TokenKind::Certificate => Err(LedgerError::InvalidForwardKind {
            code: forward.kind.code(),
        }),
    }
}

/// `a * b / denominator`, rounded down. `denominator` must be non-zero.
fn mul_div(a: U256, b: U256, denominator: U256) -> LedgerResult<U256> {
    let quotient = a.full_mul(b) / U512::from(denominator);
    U256::try_from(quotient).map_err(|_| LedgerError::ArithmeticOverflow)
}
