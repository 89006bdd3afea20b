//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (thresholds > 0, window capacity > 0)
//! - Check the target address and webhook URL are well formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before the sampling loop starts; any error is fatal

use std::net::IpAddr;

use thiserror::Error;
use url::{Host, Url};

use crate::config::schema::MonitorConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("target address is empty")]
    MissingAddress,

    #[error("target address '{address}' is not a valid host: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("tcp.failure_threshold must be greater than 0")]
    ZeroFailureThreshold,

    #[error("icmp.change_threshold must be in (0, 100], got {0}")]
    ChangeThresholdOutOfRange(f64),

    #[error("icmp.sample_size must be greater than 0")]
    ZeroSampleSize,

    #[error("icmp.packet_count must be greater than 0")]
    ZeroPacketCount,

    #[error("icmp.ping_program is empty")]
    EmptyPingProgram,

    #[error("{0} must be greater than 0 seconds")]
    ZeroDuration(&'static str),

    #[error("alert.webhook_url '{url}' is invalid: {reason}")]
    InvalidWebhookUrl { url: String, reason: String },
}

/// Render a list of errors as one comma-separated line.
pub fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = validate_address(&config.target.address) {
        errors.push(e);
    }

    if config.tcp.failure_threshold == 0 {
        errors.push(ValidationError::ZeroFailureThreshold);
    }
    if config.tcp.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("tcp.connect_timeout_secs"));
    }

    let change = config.icmp.change_threshold;
    if !change.is_finite() || change <= 0.0 || change > 100.0 {
        errors.push(ValidationError::ChangeThresholdOutOfRange(change));
    }
    if config.icmp.sample_size == 0 {
        errors.push(ValidationError::ZeroSampleSize);
    }
    if config.icmp.packet_count == 0 {
        errors.push(ValidationError::ZeroPacketCount);
    }
    if config.icmp.ping_program.trim().is_empty() {
        errors.push(ValidationError::EmptyPingProgram);
    }

    if config.schedule.interval_secs == 0 {
        errors.push(ValidationError::ZeroDuration("schedule.interval_secs"));
    }

    if let Some(url) = &config.alert.webhook_url {
        if let Err(e) = validate_webhook_url(url) {
            errors.push(e);
        }
    }
    if config.alert.timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("alert.timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Accepts bare IPv4/IPv6 literals and anything `url` accepts as a host.
fn validate_address(address: &str) -> Result<(), ValidationError> {
    if address.trim().is_empty() {
        return Err(ValidationError::MissingAddress);
    }
    if address.parse::<IpAddr>().is_ok() {
        return Ok(());
    }

    Host::parse(address)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

fn validate_webhook_url(raw: &str) -> Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidWebhookUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
