//! Cross-subsystem flows.

pub mod fixtures;

mod scenario_replay;
mod transfer_flows;
