//! Replay driver for the Venue Sentinel anomaly engine.
//!
//! Reads a JSON-lines tick file, runs every tick through one
//! [`AnomalyEngine`], and writes each anomaly to stdout as an envelope
//! line. Logs go to stderr so stdout stays machine-readable.
//!
//! # Startup Sequence
//!
//! 1. Parse arguments; the tick file comes from the first argument or
//!    `SENTINEL_TICKS`
//! 2. Load configuration from `--config`, else `sentinel-config.yaml`
//!    (defaults if absent)
//! 3. Initialize structured logging (tracing)
//! 4. Replay the file
//! 5. Log the summary
//!
//! [`AnomalyEngine`]: sentinel_core::AnomalyEngine

mod cli;
mod error;
mod publish;
mod replay;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use clap::Parser;

use sentinel_core::config::{LoggingConfig, SentinelConfig};
use sentinel_core::AnomalyEngine;
use sentinel_types::SessionId;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::EngineError;
use crate::publish::Publisher;

/// Config file looked up in the working directory.
const CONFIG_FILE: &str = "sentinel-config.yaml";

/// Application entry point for the replay driver.
///
/// # Errors
///
/// Returns an error if configuration, the tick file, or output fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Parse arguments.
    let cli = Cli::parse();

    // 2. Load configuration.
    let config = load_config(cli.config.as_deref())?;

    // 3. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        sport = %config.venue.sport,
        baseline_mode = ?config.baseline.mode,
        "sentinel-engine starting"
    );

    // 4. Replay.
    let input = BufReader::new(File::open(&cli.ticks)?);
    info!(path = %cli.ticks.display(), "Replaying tick file");

    let session_id = config
        .venue
        .session_id
        .clone()
        .unwrap_or_else(|| SessionId::new().to_string());
    let mut engine = AnomalyEngine::new(&config);
    let stdout = std::io::stdout();
    let mut publisher = Publisher::new(BufWriter::new(stdout.lock()), session_id);
    let summary = replay::run(&config, &mut engine, input, &mut publisher)?;
    let session_id = publisher.session_id().to_owned();
    let published = publisher.published();
    publisher.finish()?;

    // 5. Log results.
    info!(
        session_id = %session_id,
        published,
        ticks = summary.ticks,
        skipped = summary.skipped,
        rejected_entities = summary.rejected_entities,
        anomalies = summary.anomalies,
        escalated = summary.escalated,
        "sentinel-engine replay complete"
    );

    Ok(())
}

/// Load configuration from `explicit`, else from `sentinel-config.yaml` in
/// the working directory, else defaults.
fn load_config(explicit: Option<&Path>) -> Result<SentinelConfig, EngineError> {
    if let Some(path) = explicit {
        return Ok(SentinelConfig::from_file(path)?);
    }
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        Ok(SentinelConfig::from_file(config_path)?)
    } else {
        Ok(SentinelConfig::default())
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
