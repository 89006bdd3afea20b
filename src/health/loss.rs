//! ICMP packet-loss detector with change hysteresis.
//!
//! # Responsibilities
//! - Record each ping outcome in a fixed-capacity rolling window
//! - Recompute the loss percentage after every sample
//! - Notify when loss drifts more than `change_threshold` points away from
//!   the value the operator was last told about
//!
//! # Decision Order
//! ```text
//! current - notified > threshold        → LossIncreased
//! notified - current > threshold        → LossDecreased
//! current == 100 && notified != 100     → TotalLoss
//! current == 0   && notified != 0       → LossCleared
//! otherwise                             → no alert
//! ```
//!
//! # Design Decisions
//! - The saturation rules guarantee a notification on full outage and full
//!   recovery even when the window is too small for the delta rules to fire
//! - `last_notified` starts at 0.0, so a successful first sample is silent and
//!   a failed one reports total loss

use crate::alert::{AlertEvent, StatusLine};
use crate::health::window::LossWindow;
use crate::health::{Detector, DetectorError};

/// Rolling-window loss estimator.
#[derive(Debug, Clone)]
pub struct LossDetector {
    window: LossWindow,
    change_threshold: f64,
    current_loss: f64,
    last_notified: f64,
}

impl LossDetector {
    pub fn new(sample_size: usize, change_threshold: f64) -> Self {
        Self {
            window: LossWindow::new(sample_size),
            change_threshold,
            current_loss: 0.0,
            last_notified: 0.0,
        }
    }

    /// Feed one probe outcome and return the alert it triggers, if any.
    pub fn record(&mut self, probe_succeeded: bool) -> Result<Option<AlertEvent>, DetectorError> {
        self.window.push(probe_succeeded);

        if self.window.len() > self.window.capacity() {
            return Err(DetectorError::WindowOverflow {
                len: self.window.len(),
                capacity: self.window.capacity(),
            });
        }

        self.current_loss = self.window.loss_percent();

        let event = self.classify();
        if event.is_some() {
            self.last_notified = self.current_loss;
        }
        Ok(event)
    }

    fn classify(&self) -> Option<AlertEvent> {
        let current = self.current_loss;
        let notified = self.last_notified;

        if current - notified > self.change_threshold {
            Some(AlertEvent::LossIncreased { from: notified, to: current })
        } else if notified - current > self.change_threshold {
            Some(AlertEvent::LossDecreased { from: notified, to: current })
        } else if current == 100.0 && notified != 100.0 {
            Some(AlertEvent::TotalLoss { from: notified })
        } else if current == 0.0 && notified != 0.0 {
            Some(AlertEvent::LossCleared { from: notified })
        } else {
            None
        }
    }

    pub fn current_loss(&self) -> f64 {
        self.current_loss
    }

    pub fn last_notified(&self) -> f64 {
        self.last_notified
    }

    pub fn window(&self) -> &LossWindow {
        &self.window
    }
}

impl Detector for LossDetector {
    fn update(&mut self, probe_succeeded: bool) -> Result<Option<AlertEvent>, DetectorError> {
        self.record(probe_succeeded)
    }

    fn status(&self, _probe_succeeded: bool) -> StatusLine {
        StatusLine::Loss {
            percent: self.current_loss,
        }
    }
}
