//! # Shared Types Crate
//!
//! Contains the value objects, error taxonomy and ports shared by every
//! energy-token subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `TokenId` and quantities are
//!   defined once here and reused by codec, ledger, documentation, issuance
//!   and distribution.
//! - **Explicit Identity**: every mutation carries a `CallContext`; the acting
//!   account is resolved through the `ClaimsGateway`, never assumed.
//! - **One Error Taxonomy**: all subsystems fail with `LedgerError`.

pub mod claims;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod registry;

pub use claims::*;
pub use entities::*;
pub use errors::*;
pub use ports::*;
pub use registry::*;
