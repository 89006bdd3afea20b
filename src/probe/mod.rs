//! Probe subsystem.
//!
//! # Data Flow
//! ```text
//! Monitor tick
//!     → Prober::probe()
//!         tcp.rs:  resolve → connect with timeout
//!         ping.rs: spawn platform ping → exit status
//!     → ProbeOutcome (monitored signal) or ProbeError (fatal)
//! ```
//!
//! # Design Decisions
//! - Expected failures (timeouts, unresolvable names, lost echoes) are
//!   outcomes, not errors
//! - Anything else means the environment is broken and stops the monitor
//! - The implementation is chosen once at startup; detectors never see it

use async_trait::async_trait;
use thiserror::Error;

pub mod ping;
pub mod tcp;

pub use ping::PingProber;
pub use tcp::TcpProber;

/// Result of one probe attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Connection established / echo answered.
    Success,
    /// TCP connect did not complete within the timeout.
    Timeout,
    /// The target name could not be resolved.
    ResolutionFailed,
    /// Ping exited with a non-zero status.
    NoReply,
}

impl ProbeOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, ProbeOutcome::Success)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProbeOutcome::Success => "success",
            ProbeOutcome::Timeout => "timeout",
            ProbeOutcome::ResolutionFailed => "resolution_failed",
            ProbeOutcome::NoReply => "no_reply",
        }
    }
}

/// Conditions that are not part of the monitored signal.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Connect failed for a reason other than timeout or resolution.
    #[error("TCP connection to {target} failed: {source}")]
    Connect {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// The ping utility could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// A single reachability test against the configured target.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self) -> Result<ProbeOutcome, ProbeError>;
}
