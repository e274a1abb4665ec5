pub mod config;
pub mod series;

pub use config::*;
pub use series::*;
