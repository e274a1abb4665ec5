//! # Energy Ledger Runtime
//!
//! Composes the subsystems into one ledger service.
//!
//! ## Modular Structure
//!
//! - `container/` - configuration and the shared ledger state
//! - `events` - journal of committed mutations
//! - `snapshot` - ordered state copies and their digest
//! - `service` - the `EnergyLedger` facade, one lock around all state
//! - `scenario` - JSON scenario replay used by the binary
//!
//! ## Operation Flow
//!
//! ```text
//! caller ──CallContext──→ EnergyLedger (write lock)
//!                              │
//!          ┌─────────┬─────────┼───────────┬──────────────┐
//!          ↓         ↓         ↓           ↓              ↓
//!       codec(1)  ledger(2)  docs(3)   issuance(4)   distribution(5)
//!                              │
//!                              ↓
//!                   committed → LedgerEvent appended
//! ```

#![allow(clippy::too_many_arguments)]

pub mod container;
pub mod errors;
pub mod events;
pub mod scenario;
pub mod service;
pub mod snapshot;

pub use container::{ConfigError, LedgerConfig, LedgerState, LoggingConfig};
pub use errors::RuntimeError;
pub use events::{EventJournal, LedgerEvent, SequencedEvent};
pub use scenario::{Scenario, ScenarioReport, ScenarioRunner};
pub use service::EnergyLedger;
pub use snapshot::LedgerSnapshot;
