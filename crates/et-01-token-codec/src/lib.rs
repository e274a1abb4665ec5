//! # ET-01 Token Codec - Token Identifier Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Maps `(kind, settlement period, reference account)` to a 256-bit token id
//! and back. Token ids are never assigned; they are always derived here.
//!
//! ## Layout (big-endian, 32 bytes)
//!
//! ```text
//! | 0..3 padding | 3 kind code | 4..12 period (u64) | 12..32 reference account |
//! ```
//!
//! ## Kind Code Table
//!
//! | Kind | Position | Code |
//! |------|----------|------|
//! | `AbsoluteForward` | 0 | `0x00` |
//! | `GenerationBasedForward` | 1 | `0x02` |
//! | `ConsumptionBasedForward` | 2 | `0x03` |
//! | `Certificate` | 3 | `0x04` |
//!
//! Codes are fixed, not ordinal, so new kinds can be added without
//! renumbering existing ids.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod kind;

pub use codec::{certificate_id_for, code_to_kind, decode, encode, kind_to_code, TokenDescriptor};
pub use kind::TokenKind;

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;
