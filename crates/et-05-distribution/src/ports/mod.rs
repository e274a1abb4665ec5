//! # Ports
//!
//! - `outbound`: metered energy and issued series, read-only.

pub mod outbound;

pub use outbound::*;
