//! # ET-05 Distribution Engine
//!
//! **Subsystem ID:** 5
//!
//! ## Purpose
//!
//! Settles forwards: for one `(recipient, forward id)` it computes how many
//! certificates the recipient's forward balance entitles them to, and moves
//! the not-yet-settled part from the series' distributor to the recipient.
//! Forward balances are never burned.
//!
//! ## Entitlement
//!
//! With `B` the recipient's forward balance, `S` the series supply, `G` the
//! reference site's documented generation and `C` the recipient's documented
//! consumption for the period (all 18-decimal, rounded down):
//!
//! | Kind | Entitlement |
//! |------|-------------|
//! | `AbsoluteForward` | `B` if `S <= G`, else `B * G / S` |
//! | `GenerationBasedForward` | `B * G / S` (0 if `S` or `G` is 0) |
//! | `ConsumptionBasedForward` | `B * min(C, G) / 100` units; fails if `G` is 0 |
//!
//! ## Settlement State
//!
//! Per `(recipient, forward id)`: `Uninitialized -> Settled(amount)`.
//! `held = min(settled, recipient's certificate balance)` is the part of
//! earlier payouts still in the recipient's hands. Each call pays
//! `entitlement - held` (if positive) and stores `max(held, entitlement)`.
//! Repeated calls pay only newly due deltas; certificates returned to the
//! distributor are paid out again.

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::DistributionEngine;

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 5;
