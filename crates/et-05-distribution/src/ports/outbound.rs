//! # Driven Ports (SPI - Outbound)

use shared_types::{Address, SettlementPeriod, TokenId, U256};

/// Documented energy per `(account, period)`.
pub trait MeteredEnergySource {
    /// Generation reading; zero when none is on file.
    fn generation(&self, account: &Address, period: SettlementPeriod) -> U256;

    /// Consumption reading; zero when none is on file.
    fn consumption(&self, account: &Address, period: SettlementPeriod) -> U256;
}

/// Issued forward series.
pub trait SeriesSource {
    /// Distributor of the series, or `None` if it was never issued.
    fn distributor_of(&self, forward_id: &TokenId) -> Option<Address>;
}
