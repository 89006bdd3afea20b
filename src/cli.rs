//! Command-line interface.
//!
//! Flags override values from the optional TOML file; the merged result is
//! validated as a whole.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{read_config, ConfigError};
use crate::config::validation::validate_config;
use crate::config::MonitorConfig;

#[derive(Debug, Parser)]
#[command(name = "reachmon", version)]
#[command(about = "Watch a host with TCP connects or ICMP pings and alert on changes", long_about = None)]
pub struct Cli {
    /// Address to be monitored
    pub address: Option<String>,

    /// TCP port; omit (or 0) for ICMP mode
    #[arg(short, long)]
    pub port: Option<u16>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Consecutive TCP failures before alerting
    #[arg(long)]
    pub failure_threshold: Option<u32>,

    /// Packet-loss change (percentage points) needed to re-notify
    #[arg(long)]
    pub change_threshold: Option<f64>,

    /// Number of pings in the rolling loss window
    #[arg(long)]
    pub sample_size: Option<usize>,

    /// Seconds between probes
    #[arg(long)]
    pub interval_secs: Option<u64>,

    /// TCP connect timeout in seconds
    #[arg(long)]
    pub connect_timeout_secs: Option<u64>,

    /// Echo requests per ping probe
    #[arg(long)]
    pub ping_count: Option<u32>,

    /// Incoming-webhook URL receiving alerts
    #[arg(long, env = "REACHMON_WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// Directory for per-day status logs
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit JSON log lines
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Read the config file (if any), apply flags, validate.
    pub fn load_config(&self) -> Result<MonitorConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => read_config(path)?,
            None => MonitorConfig::default(),
        };

        let config = self.apply(base);
        validate_config(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Overlay every flag that was given onto `config`.
    pub fn apply(&self, mut config: MonitorConfig) -> MonitorConfig {
        if let Some(address) = &self.address {
            config.target.address = address.clone();
        }
        if let Some(port) = self.port {
            config.target.port = port;
        }
        if let Some(threshold) = self.failure_threshold {
            config.tcp.failure_threshold = threshold;
        }
        if let Some(timeout) = self.connect_timeout_secs {
            config.tcp.connect_timeout_secs = timeout;
        }
        if let Some(threshold) = self.change_threshold {
            config.icmp.change_threshold = threshold;
        }
        if let Some(size) = self.sample_size {
            config.icmp.sample_size = size;
        }
        if let Some(count) = self.ping_count {
            config.icmp.packet_count = count;
        }
        if let Some(interval) = self.interval_secs {
            config.schedule.interval_secs = interval;
        }
        if let Some(url) = &self.webhook_url {
            config.alert.webhook_url = Some(url.clone());
        }
        if let Some(dir) = &self.log_dir {
            config.journal.directory = Some(dir.clone());
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if self.json_logs {
            config.observability.json = true;
        }
        config
    }
}
