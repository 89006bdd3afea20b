//! Reachability checking subsystem.
//!
//! # Data Flow
//! ```text
//! Sampling loop (monitor.rs):
//!     Fixed-interval timer
//!     → Run the active probe once
//!     → Feed the outcome to the active detector
//!     → Dispatch any alert, append the status line
//!
//! TCP mode (failure.rs):
//!     Consecutive-failure streak
//!     → Alert once at the threshold, once on recovery
//!
//! ICMP mode (loss.rs + window.rs):
//!     Rolling window of outcomes
//!     → Loss percentage
//!     → Alert when it moves past the change threshold
//! ```
//!
//! # Design Decisions
//! - Exactly one detector is active per process, chosen at startup
//! - Detectors own their state and are driven through `&mut self`
//! - Detectors never see time or I/O; the loop supplies both

use thiserror::Error;

use crate::alert::{AlertEvent, StatusLine};

pub mod failure;
pub mod loss;
pub mod monitor;
pub mod window;

pub use failure::FailureDetector;
pub use loss::LossDetector;
pub use monitor::{Monitor, MonitorError};
pub use window::LossWindow;

/// Internal invariant violations. Unreachable by construction.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("rolling window holds {len} outcomes but its capacity is {capacity}")]
    WindowOverflow { len: usize, capacity: usize },
}

/// A stateful consumer of probe outcomes.
pub trait Detector: Send {
    /// Record one outcome and decide whether the operator should hear about it.
    fn update(&mut self, probe_succeeded: bool) -> Result<Option<AlertEvent>, DetectorError>;

    /// Describe the state after the most recent update.
    fn status(&self, probe_succeeded: bool) -> StatusLine;
}
