//! reachmon: lightweight "is this host still up" watchdog.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                         reachmon                             │
//!   │                                                              │
//!   │  ┌─────────┐   every    ┌──────────────┐    bool   ┌────────┐│
//!   │  │ monitor │──interval─▶│    probe     │──────────▶│detector││
//!   │  │  loop   │            │ tcp │ ping   │           │ streak ││
//!   │  └────┬────┘            └──────────────┘           │ │ loss ││
//!   │       │                                            └───┬────┘│
//!   │       │  status line                     AlertEvent    │     │
//!   │       ▼                                                ▼     │
//!   │  ┌─────────┐                                    ┌──────────┐ │
//!   │  │ journal │                                    │ notifier │─┼──▶ webhook
//!   │  │ per-day │                                    └──────────┘ │
//!   │  └─────────┘                                                 │
//!   └──────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;

use reachmon::cli::Cli;
use reachmon::lifecycle::{build_monitor, signals};
use reachmon::observability::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("reachmon: {}", e);
            std::process::exit(2);
        }
    };

    init_logging(&config.observability);

    tracing::info!("reachmon v{} starting", env!("CARGO_PKG_VERSION"));

    let monitor = build_monitor(&config)?;

    if let Err(e) = monitor.run(signals::shutdown_signal()).await {
        tracing::error!(error = %e, "Monitor stopped");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
