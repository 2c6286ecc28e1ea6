use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use ruttvakt_config::RuttvaktConfig;
use ruttvakt_engine::MonitorRuntime;
use ruttvakt_telemetry::metrics::MetricsRecorder;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Watch the kernel routing socket for interface and address changes
    Run(RunArgs),
    /// Decode hex-encoded routing datagrams from a trace file
    Decode(DecodeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Configuration file (YAML); defaults and environment apply otherwise.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the number of decode workers.
    #[arg(long)]
    pub workers: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Trace file, one hex-encoded datagram per line.
    #[arg(short, long)]
    pub input: PathBuf,
}

pub async fn run_monitor_mode(
    args: RunArgs,
    metrics: MetricsRecorder,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = match &args.config {
        Some(path) => RuttvaktConfig::load_from_path(path)?,
        None => RuttvaktConfig::load()?,
    };
    if let Some(workers) = args.workers {
        config.core.workers = workers;
    }

    MonitorRuntime::new(config, metrics).run().await?;
    Ok(())
}

pub async fn run_decode_mode(
    args: DecodeArgs,
    metrics: MetricsRecorder,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    ruttvakt_engine::run_decode_mode(&args.input, metrics.clone()).await?;
    info!(
        processed = metrics.processed_events.get(),
        "trace decoding finished"
    );
    Ok(())
}
