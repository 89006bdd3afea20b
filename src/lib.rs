//! Continuous network-reachability monitor.
//!
//! Probes a single host once per interval, with either a TCP connect test
//! (when a port is configured) or an ICMP echo via the platform `ping`, and
//! notifies an operator when reachability changes meaningfully.

pub mod alert;
pub mod cli;
pub mod config;
pub mod health;
pub mod journal;
pub mod lifecycle;
pub mod observability;
pub mod probe;

pub use config::MonitorConfig;
pub use health::Monitor;
