//! Alert events and their human-readable rendering.
//!
//! Detectors only decide *that* something happened. The text an operator
//! sees is produced here, with the tick timestamp passed in explicitly.

use chrono::{DateTime, Local};

/// Timestamp layout used in every alert and status line.
pub const TIMESTAMP_FORMAT: &str = "%a, %Y-%m-%d %H:%M:%S";

/// A state change worth telling the operator about.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertEvent {
    /// The failure streak reached the configured threshold.
    ConnectionFailed { port: u16 },
    /// First successful connect after one or more failures.
    ConnectionRestored { port: u16 },
    /// Loss rose by more than the change threshold.
    LossIncreased { from: f64, to: f64 },
    /// Loss fell by more than the change threshold.
    LossDecreased { from: f64, to: f64 },
    /// Every probe in the window failed.
    TotalLoss { from: f64 },
    /// No probe in the window failed.
    LossCleared { from: f64 },
}

impl AlertEvent {
    /// Render the single-line message delivered to alert sinks.
    pub fn render(&self, timestamp: &DateTime<Local>, address: &str) -> String {
        let ts = timestamp.format(TIMESTAMP_FORMAT);
        match self {
            AlertEvent::ConnectionFailed { port } => {
                format!("{} TCP connection to {} failed on port {}", ts, address, port)
            }
            AlertEvent::ConnectionRestored { port } => {
                format!("{} TCP connection to {} succeeded on port {}", ts, address, port)
            }
            AlertEvent::LossIncreased { from, to } => loss_change(&ts, address, "increased", *from, *to),
            AlertEvent::LossDecreased { from, to } => loss_change(&ts, address, "decreased", *from, *to),
            AlertEvent::TotalLoss { from } => loss_change(&ts, address, "increased", *from, 100.0),
            AlertEvent::LossCleared { from } => loss_change(&ts, address, "decreased", *from, 0.0),
        }
    }

    /// Short machine-friendly name for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AlertEvent::ConnectionFailed { .. } => "connection_failed",
            AlertEvent::ConnectionRestored { .. } => "connection_restored",
            AlertEvent::LossIncreased { .. } => "loss_increased",
            AlertEvent::LossDecreased { .. } => "loss_decreased",
            AlertEvent::TotalLoss { .. } => "total_loss",
            AlertEvent::LossCleared { .. } => "loss_cleared",
        }
    }
}

fn loss_change(ts: &impl std::fmt::Display, address: &str, verb: &str, from: f64, to: f64) -> String {
    format!(
        "{} Packet loss for {} {} from {}% to {}%",
        ts,
        address,
        verb,
        format_percent(from),
        format_percent(to)
    )
}

/// Per-tick status, written to the journal whether or not an alert fired.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusLine {
    Connection { port: u16, succeeded: bool },
    Loss { percent: f64 },
}

impl StatusLine {
    pub fn render(&self, timestamp: &DateTime<Local>, address: &str) -> String {
        let ts = timestamp.format(TIMESTAMP_FORMAT);
        match self {
            StatusLine::Connection { port, succeeded } => {
                let outcome = if *succeeded { "succeeded" } else { "failed" };
                format!("{} TCP connection to {} {} on port {}", ts, address, outcome, port)
            }
            StatusLine::Loss { percent } => {
                format!("{} Packet loss for {} is {}%", ts, address, format_percent(*percent))
            }
        }
    }
}

/// At most two decimals, without trailing zeros ("10", "33.33", "0.5").
pub fn format_percent(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}
