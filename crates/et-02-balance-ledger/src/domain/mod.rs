pub mod approvals;
pub mod balances;
pub mod eligibility;
pub mod policy;
pub mod staging;

pub use approvals::*;
pub use balances::*;
pub use eligibility::*;
pub use policy::*;
pub use staging::{CommitPlan, StagedWrites};
