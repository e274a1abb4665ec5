//! # ET-03 Energy Documentation Store
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! Keeps one metered reading per `(account, settlement period)`: how much
//! energy the site generated or consumed, whether the reading is final
//! (corrected), and which metering authority attested it.
//!
//! ## Write Rules
//!
//! | Stored record | Incoming write | Result |
//! |---------------|----------------|--------|
//! | none | any | created |
//! | provisional | any | replaced |
//! | corrected | corrected | replaced |
//! | corrected | provisional | `CorrectionDowngradeRejected` |
//!
//! The latest accepted reading wins; readings never accumulate.
//!
//! ## Security
//!
//! Only accounts holding `IS_METERING_AUTHORITY` may write, and only through
//! an identity they control. A bare key is rejected even if it owns such an
//! identity.

#![warn(clippy::all)]

pub mod domain;
pub mod service;

pub use domain::*;
pub use service::DocumentationStore;

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 3;
