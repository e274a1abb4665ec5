//! # Energy Ledger Runtime
//!
//! Replays a JSON scenario against a fresh ledger and prints the resulting
//! report (state digest, snapshot, events) as JSON on stdout. Logs go to
//! stderr.
//!
//! ```text
//! ledger-runtime <scenario.json>
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults + `ET_*` environment overrides)
//! 2. Validate it
//! 3. Install the log subscriber at `logging.level`
//! 4. Parse and replay the scenario; the first failing step aborts

use anyhow::{bail, Context, Result};
use ledger_runtime::{LedgerConfig, Scenario, ScenarioRunner};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let config = LedgerConfig::from_env();
    config.validate().context("Invalid ledger configuration")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(&config.logging.level))
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: ledger-runtime <scenario.json>");
    };

    info!(path = %path, "Loading scenario");
    let input = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read scenario file {path}"))?;
    let scenario = Scenario::from_json(&input)?;

    let report = ScenarioRunner::run(&scenario, config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
