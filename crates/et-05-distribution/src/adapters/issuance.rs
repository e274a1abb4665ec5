use crate::ports::SeriesSource;
use et_04_forward_issuance::SeriesRegistry;
use shared_types::{Address, TokenId};

impl SeriesSource for SeriesRegistry {
    fn distributor_of(&self, forward_id: &TokenId) -> Option<Address> {
        self.get(forward_id).map(|series| series.distributor)
    }
}
