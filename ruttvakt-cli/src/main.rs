//! Ruttvakt entrypoint: watches the kernel routing socket and reports
//! interface and address changes, live or from a captured trace.

use clap::Parser;

use ruttvakt_telemetry::logging::EventLogger;
use ruttvakt_telemetry::metrics::MetricsRecorder;

mod commands;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    EventLogger::init();
    let metrics = MetricsRecorder::new();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(run_args) => commands::run_monitor_mode(run_args, metrics).await,
        Commands::Decode(decode_args) => commands::run_decode_mode(decode_args, metrics).await,
    }
}
