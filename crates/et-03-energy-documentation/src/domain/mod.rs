pub mod record;
pub mod rules;

pub use record::*;
pub use rules::check_overwrite;
