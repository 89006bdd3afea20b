//! Startup orchestration.
//!
//! # Responsibilities
//! - Re-check the merged configuration
//! - Pick the probe mode (TCP when a port is set, ICMP otherwise)
//! - Build the prober, detector, alert sinks and optional journal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, before the first tick

use thiserror::Error;

use crate::alert::{AlertError, Notifier, WebhookSink};
use crate::config::validation::{join_errors, validate_config, ValidationError};
use crate::config::{MonitorConfig, ProbeMode};
use crate::health::{Detector, FailureDetector, LossDetector, Monitor};
use crate::journal::DailyLogFile;
use crate::probe::{PingProber, Prober, TcpProber};

/// Errors that prevent the monitor from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    #[error("failed to initialise alert sink: {0}")]
    Alert(#[from] AlertError),
}

/// Assemble a ready-to-run monitor from validated configuration.
pub fn build_monitor(config: &MonitorConfig) -> Result<Monitor, StartupError> {
    validate_config(config).map_err(StartupError::Invalid)?;

    let address = config.target.address.clone();
    let mode = config.mode();

    let (prober, detector): (Box<dyn Prober>, Box<dyn Detector>) = match mode {
        ProbeMode::Tcp => (
            Box::new(TcpProber::new(
                address.clone(),
                config.target.port,
                config.tcp.connect_timeout(),
            )),
            Box::new(FailureDetector::new(
                config.target.port,
                config.tcp.failure_threshold,
            )),
        ),
        ProbeMode::Icmp => (
            Box::new(
                PingProber::new(address.clone(), config.icmp.packet_count)
                    .with_program(config.icmp.ping_program.clone()),
            ),
            Box::new(LossDetector::new(
                config.icmp.sample_size,
                config.icmp.change_threshold,
            )),
        ),
    };

    let mut notifier = Notifier::new();
    if let Some(url) = &config.alert.webhook_url {
        notifier = notifier.with_sink(WebhookSink::new(url.clone(), config.alert.timeout())?);
    }

    tracing::info!(
        address = %address,
        mode = mode.label(),
        port = config.target.port,
        webhook = config.alert.webhook_url.is_some(),
        journal = ?config.journal.directory,
        "Monitor configured"
    );

    let mut monitor = Monitor::new(
        address.clone(),
        config.schedule.interval(),
        prober,
        detector,
        notifier,
    );

    if let Some(directory) = &config.journal.directory {
        monitor = monitor.with_journal(DailyLogFile::new(directory.clone(), address, mode.label()));
    }

    Ok(monitor)
}
