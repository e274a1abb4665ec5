//! # Correction Rule
//!
//! A corrected reading is final with respect to provisional ones: it can be
//! superseded by a newer correction, never by a provisional reading.

use crate::domain::record::EnergyDocumentation;
use shared_types::{Address, LedgerError, LedgerResult, SettlementPeriod};

/// Checks whether a write with `is_corrected` may replace `existing`.
pub fn check_overwrite(
    existing: Option<&EnergyDocumentation>,
    is_corrected: bool,
    account: &Address,
    period: SettlementPeriod,
) -> LedgerResult<()> {
    match existing {
        Some(stored) if stored.is_corrected && !is_corrected => {
            Err(LedgerError::CorrectionDowngradeRejected {
                account: *account,
                period,
            })
        }
        _ => Ok(()),
    }
}
