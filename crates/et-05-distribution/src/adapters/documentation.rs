use crate::ports::MeteredEnergySource;
use et_03_energy_documentation::DocumentationStore;
use shared_types::{Address, SettlementPeriod, U256};

impl MeteredEnergySource for DocumentationStore {
    fn generation(&self, account: &Address, period: SettlementPeriod) -> U256 {
        DocumentationStore::generation(self, account, period)
    }

    fn consumption(&self, account: &Address, period: SettlementPeriod) -> U256 {
        DocumentationStore::consumption(self, account, period)
    }
}
