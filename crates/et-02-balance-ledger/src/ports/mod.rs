//! # Ports
//!
//! - `outbound`: what the ledger needs from other subsystems.

pub mod outbound;

pub use outbound::*;
