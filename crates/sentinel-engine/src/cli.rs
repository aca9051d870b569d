//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Replay a tick file through the Venue Sentinel anomaly engine.
#[derive(Debug, Parser)]
#[command(name = "sentinel-engine")]
#[command(about = "Replay venue ticks and emit anomaly envelopes as JSON lines", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON-lines tick file
    #[arg(env = "SENTINEL_TICKS")]
    pub ticks: PathBuf,

    /// Configuration file path (defaults to `sentinel-config.yaml` if present)
    #[arg(short, long, env = "SENTINEL_CONFIG")]
    pub config: Option<PathBuf>,
}
