//! # Driven Ports (SPI - Outbound)
//!
//! The ledger only mints forwards for series that Forward Issuance
//! (Subsystem 4) has registered. Subsystem 4 implements this port; the
//! ledger never depends on it directly.

use shared_types::TokenId;
use std::collections::BTreeSet;

/// Lookup of issued forward series.
pub trait SeriesDirectory {
    /// True once the series behind `token_id` has been created.
    fn is_issued(&self, token_id: &TokenId) -> bool;
}

impl SeriesDirectory for BTreeSet<TokenId> {
    fn is_issued(&self, token_id: &TokenId) -> bool {
        self.contains(token_id)
    }
}
