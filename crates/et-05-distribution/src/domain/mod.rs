pub mod entitlement;
pub mod settlement;

pub use entitlement::*;
pub use settlement::*;
