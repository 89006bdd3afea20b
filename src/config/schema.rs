//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive `Deserialize` and fall back to defaults field by field.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for the reachability monitor.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Host (and optional port) being watched.
    pub target: TargetConfig,

    /// TCP connect-test settings.
    pub tcp: TcpConfig,

    /// ICMP loss-estimation settings.
    pub icmp: IcmpConfig,

    /// Sampling cadence.
    pub schedule: ScheduleConfig,

    /// Alert delivery settings.
    pub alert: AlertConfig,

    /// Optional per-day status log.
    pub journal: JournalConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Which probe the monitor runs. Fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMode {
    Tcp,
    Icmp,
}

impl ProbeMode {
    /// Short protocol label used in log file names.
    pub fn label(self) -> &'static str {
        match self {
            ProbeMode::Tcp => "tcp",
            ProbeMode::Icmp => "icmp",
        }
    }
}

impl MonitorConfig {
    /// TCP mode when a non-zero port is configured, ICMP otherwise.
    pub fn mode(&self) -> ProbeMode {
        if self.target.port > 0 {
            ProbeMode::Tcp
        } else {
            ProbeMode::Icmp
        }
    }
}

/// Monitored target.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TargetConfig {
    /// Hostname or IP address.
    pub address: String,

    /// TCP port. `0` selects ICMP mode.
    pub port: u16,
}

/// TCP failure-streak settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TcpConfig {
    /// Consecutive failures before a "down" alert.
    pub failure_threshold: u32,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            connect_timeout_secs: 2,
        }
    }
}

impl TcpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// ICMP rolling-window settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IcmpConfig {
    /// Minimum change in percentage points before re-notifying.
    pub change_threshold: f64,

    /// Capacity of the rolling outcome window.
    pub sample_size: usize,

    /// Echo requests sent per probe.
    pub packet_count: u32,

    /// Ping executable (resolved through `PATH` unless absolute).
    pub ping_program: String,
}

impl Default for IcmpConfig {
    fn default() -> Self {
        Self {
            change_threshold: 5.0,
            sample_size: 300,
            packet_count: 1,
            ping_program: "ping".to_string(),
        }
    }
}

/// Sampling cadence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Sleep between ticks, in seconds.
    pub interval_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { interval_secs: 1 }
    }
}

impl ScheduleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Alert delivery configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Incoming-webhook URL (Slack-compatible `{"text": ...}` body).
    /// Alerts are only logged when unset.
    pub webhook_url: Option<String>,

    /// Webhook request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: 10,
        }
    }
}

impl AlertConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Per-day status log.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct JournalConfig {
    /// Directory receiving one file per day, address and protocol.
    /// Disabled when unset.
    pub directory: Option<PathBuf>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,

    /// Emit JSON log lines instead of the compact text format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_follows_port() {
        let mut config = MonitorConfig::default();
        assert_eq!(config.mode(), ProbeMode::Icmp);

        config.target.port = 443;
        assert_eq!(config.mode(), ProbeMode::Tcp);
        assert_eq!(config.mode().label(), "tcp");
    }

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.tcp.failure_threshold, 3);
        assert_eq!(config.tcp.connect_timeout(), Duration::from_secs(2));
        assert_eq!(config.icmp.sample_size, 300);
        assert_eq!(config.schedule.interval(), Duration::from_secs(1));
        assert!(config.alert.webhook_url.is_none());
        assert!(config.journal.directory.is_none());
    }
}
