//! # Energy-Token Test Suite
//!
//! Unified test crate for flows that cross subsystem boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks (transfers, distribution)
//! └── src/
//!     └── integration/  # Cross-subsystem flows through EnergyLedger
//!         ├── fixtures.rs
//!         ├── transfer_flows.rs
//!         ├── distribution_flows.rs
//!         └── scenario_replay.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p et-tests
//!
//! # By flow
//! cargo test -p et-tests integration::distribution_flows::
//!
//! # Benchmarks
//! cargo bench -p et-tests
//! ```

#![allow(dead_code)]

pub mod integration;
