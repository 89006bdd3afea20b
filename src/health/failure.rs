//! TCP failure-streak detector.
//!
//! # State Transitions
//! ```text
//! Up   → Down: consecutive failures == failure_threshold (alert once)
//! Down → Up:   first success after any failure (alert once, reset)
//! ```
//!
//! # Design Decisions
//! - The trigger is `==`, not `>=`: an outage produces a single alert no matter
//!   how long it lasts
//! - A success below the threshold still reports recovery and resets the streak

use crate::alert::{AlertEvent, StatusLine};
use crate::health::{Detector, DetectorError};

/// Counts back-to-back failed connects to a single port.
#[derive(Debug, Clone)]
pub struct FailureDetector {
    port: u16,
    failure_threshold: u32,
    consecutive_failures: u32,
}

impl FailureDetector {
    pub fn new(port: u16, failure_threshold: u32) -> Self {
        Self {
            port,
            failure_threshold,
            consecutive_failures: 0,
        }
    }

    /// Feed one probe outcome and return the alert it triggers, if any.
    pub fn record(&mut self, probe_succeeded: bool) -> Option<AlertEvent> {
        if probe_succeeded {
            if self.consecutive_failures == 0 {
                return None;
            }
            tracing::debug!(
                port = self.port,
                failures = self.consecutive_failures,
                "Connection restored"
            );
            self.consecutive_failures = 0;
            return Some(AlertEvent::ConnectionRestored { port: self.port });
        }

        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        if self.consecutive_failures == self.failure_threshold {
            Some(AlertEvent::ConnectionFailed { port: self.port })
        } else {
            None
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn failure_threshold(&self) -> u32 {
        self.failure_threshold
    }
}

impl Detector for FailureDetector {
    fn update(&mut self, probe_succeeded: bool) -> Result<Option<AlertEvent>, DetectorError> {
        Ok(self.record(probe_succeeded))
    }

    fn status(&self, probe_succeeded: bool) -> StatusLine {
        StatusLine::Connection {
            port: self.port,
            succeeded: probe_succeeded,
        }
    }
}
