//! Port implementations over the sibling subsystems' stores.

pub mod documentation;
pub mod issuance;
