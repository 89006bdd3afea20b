//! Fixed-capacity rolling window of probe outcomes.
//!
//! # Responsibilities
//! - Keep the most recent `capacity` outcomes in arrival order
//! - Evict the oldest outcome in O(1) when full
//! - Maintain a running failure count so loss is O(1) to compute

use std::collections::VecDeque;

/// FIFO ring of probe outcomes (`true` = success).
#[derive(Debug, Clone)]
pub struct LossWindow {
    outcomes: VecDeque<bool>,
    capacity: usize,
    failures: usize,
}

impl LossWindow {
    /// Create an empty window. `capacity` must be non-zero (enforced by config validation).
    pub fn new(capacity: usize) -> Self {
        Self {
            outcomes: VecDeque::with_capacity(capacity),
            capacity,
            failures: 0,
        }
    }

    /// Record an outcome, evicting the oldest one if the window is full.
    pub fn push(&mut self, succeeded: bool) {
        if self.outcomes.len() == self.capacity {
            if let Some(false) = self.outcomes.pop_front() {
                self.failures -= 1;
            }
        }
        self.outcomes.push_back(succeeded);
        if !succeeded {
            self.failures += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of failed outcomes currently held.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Percentage of failed outcomes; 0.0 for an empty window.
    pub fn loss_percent(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        100.0 * self.failures as f64 / self.outcomes.len() as f64
    }

    /// Outcomes from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.outcomes.iter().copied()
    }
}
