//! Alert delivery subsystem.
//!
//! # Data Flow
//! ```text
//! Detector decides → AlertEvent (event.rs)
//!     → rendered with the tick timestamp
//!     → Notifier::dispatch
//!         → every configured AlertSink (webhook.rs)
//! ```
//!
//! # Design Decisions
//! - Delivery is fire-and-forget: a failing sink is logged and skipped
//! - No retries; the next alert goes out on its own schedule
//! - Every alert is also logged at info level, so a monitor without sinks
//!   still reports to stdout

use async_trait::async_trait;
use thiserror::Error;

pub mod event;
pub mod webhook;

pub use event::{AlertEvent, StatusLine};
pub use webhook::WebhookSink;

/// Errors raised while delivering an alert.
#[derive(Debug, Error)]
pub enum AlertError {
    /// Request could not be built or sent.
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("webhook rejected alert with status {0}")]
    Rejected(u16),
}

/// Destination for human-readable alert text.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Name used in delivery-failure logs.
    fn name(&self) -> &str;

    async fn send(&self, message: &str) -> Result<(), AlertError>;
}

/// Fans an alert out to every configured sink.
#[derive(Default)]
pub struct Notifier {
    sinks: Vec<Box<dyn AlertSink>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink.
    pub fn with_sink(mut self, sink: impl AlertSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Deliver `message` to every sink and return how many accepted it.
    ///
    /// Never fails: delivery errors are logged and swallowed.
    pub async fn dispatch(&self, message: &str) -> usize {
        let mut delivered = 0;
        for sink in &self.sinks {
            match sink.send(message).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(sink = sink.name(), error = %e, "Alert delivery failed");
                }
            }
        }
        delivered
    }
}
