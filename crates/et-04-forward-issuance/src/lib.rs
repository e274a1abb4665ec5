//! # ET-04 Forward Issuance
//!
//! **Subsystem ID:** 4
//!
//! ## Purpose
//!
//! A generation site sells its future output as a *forward series*: all
//! forwards of one kind for one settlement period, referencing the site. Each
//! series is created exactly once, by the site itself, and names the
//! distributor that will later pay out certificates against it.
//!
//! ## Issuance by Kind
//!
//! | Kind | On creation |
//! |------|-------------|
//! | `AbsoluteForward` | series registered |
//! | `GenerationBasedForward` | series registered, issuer credited its stake |
//! | `ConsumptionBasedForward` | series registered |
//! | `Certificate` | rejected with `InvalidForwardKind` |
//!
//! Once a series exists, further forwards are created through the balance
//! ledger's `mint`, which consults this registry via `SeriesDirectory`.

#![warn(clippy::all)]

pub mod domain;
pub mod service;

pub use domain::*;
pub use service::SeriesRegistry;

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 4;
