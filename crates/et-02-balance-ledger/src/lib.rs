//! # ET-02 Balance Ledger - Multi-Asset Accounting Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Holds `(account, token id) -> quantity` for forwards and certificates, and
//! the reception approvals that gate peer-to-peer transfers.
//!
//! ## Reception Approval
//!
//! Transfers are push-based, so the **recipient** grants permission: an
//! approval `(approver, sender, token id) -> (remaining, expiry)` lets
//! `sender` push up to `remaining` units to `approver` until `expiry`. Each
//! transfer decrements it. Self-transfers need a self-approval like any other.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Transfers conserve total supply | `domain/staging.rs` - debit and credit staged together |
//! | INVARIANT-2 | Failed operations leave no trace | `service.rs` - plan fully, then `commit()` |
//! | INVARIANT-3 | Balances never go negative | `domain/staging.rs` - `debit()` |
//! | INVARIANT-4 | Recipients must be claim-eligible | `domain/eligibility.rs` - `check_recipient()` |
//!
//! ## Transfer Check Order
//!
//! 1. sender balance covers the quantity (`InsufficientBalance`)
//! 2. recipient holds the reception claims for the kind (`RecipientNotEligible`)
//! 3. an active approval `(to, from, id)` covers the quantity (`ApprovalExceeded`)

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::BalanceLedger;

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;
