//! Synthetic checkout service.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ request id ──▶ trace ──▶ timing (pre) ──▶ panic catcher ──▶ handler
//!                                                                          │
//!                   /            random echo delay                        │
//!                   /checkout    checkout simulator ──▶ checkouts_total    │
//!                   /healthz     health flag (read)                        │
//!                   /bad-health  health flag (lower)                       │
//!                   /metrics     registry render                           │
//!                                                                          ▼
//!   Client ◀──────────────── timing (post) ──▶ http_request_duration_ms ◀── response / 500
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use checkout_sim::config::load_config;
use checkout_sim::lifecycle::startup;
use checkout_sim::observability::logging;

#[derive(Parser)]
#[command(name = "checkout-sim")]
#[command(about = "Instrumented synthetic checkout service", long_about = None)]
struct Args {
    /// Optional TOML configuration file. `PORT` overrides the listen port.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("checkout-sim: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.listener.port,
        card_threshold = config.simulation.card_threshold,
        error_threshold = config.simulation.error_threshold,
        "checkout-sim starting"
    );

    match startup::run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Service stopped with error");
            ExitCode::FAILURE
        }
    }
}
