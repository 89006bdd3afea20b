//! Sampling loop.
//!
//! # Responsibilities
//! - Sleep one interval, then probe the target exactly once
//! - Feed the outcome to the active detector
//! - Render and dispatch alerts, append the per-tick status line
//! - Stop on shutdown or on any fatal probe/detector error

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Local};
use thiserror::Error;
use tokio::time;

use crate::alert::{AlertEvent, Notifier};
use crate::health::{Detector, DetectorError};
use crate::journal::LogSink;
use crate::probe::{ProbeError, Prober};

/// Conditions that end the sampling loop.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("detector invariant violated: {0}")]
    Detector(#[from] DetectorError),
}

/// Drives one prober and one detector against a single target.
pub struct Monitor {
    address: String,
    interval: Duration,
    prober: Box<dyn Prober>,
    detector: Box<dyn Detector>,
    notifier: Notifier,
    journal: Option<Box<dyn LogSink>>,
}

impl Monitor {
    pub fn new(
        address: impl Into<String>,
        interval: Duration,
        prober: Box<dyn Prober>,
        detector: Box<dyn Detector>,
        notifier: Notifier,
    ) -> Self {
        Self {
            address: address.into(),
            interval,
            prober,
            detector,
            notifier,
            journal: None,
        }
    }

    /// Also append every status line to `journal`.
    pub fn with_journal(mut self, journal: impl LogSink + 'static) -> Self {
        self.journal = Some(Box::new(journal));
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Run until `shutdown` resolves or a fatal error occurs.
    ///
    /// Ticks are separated by a plain sleep, so probe latency adds to the
    /// cadence instead of being corrected for. A tick already in progress
    /// finishes before shutdown is noticed.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) -> Result<(), MonitorError> {
        tokio::pin!(shutdown);

        tracing::info!(
            address = %self.address,
            interval_secs = self.interval.as_secs_f64(),
            "Monitor starting"
        );

        loop {
            tokio::select! {
                _ = time::sleep(self.interval) => {
                    self.tick(Local::now()).await?;
                }
                _ = &mut shutdown => {
                    tracing::info!("Monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Probe once and process the outcome. `now` is used for every line
    /// produced by this tick.
    pub async fn tick(&mut self, now: DateTime<Local>) -> Result<Option<AlertEvent>, MonitorError> {
        let outcome = match self.prober.probe().await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(address = %self.address, error = %e, "Probe failed fatally");
                return Err(e.into());
            }
        };

        let succeeded = outcome.is_success();
        let event = match self.detector.update(succeeded) {
            Ok(event) => event,
            Err(e) => {
                tracing::error!(address = %self.address, error = %e, "Refusing to continue");
                return Err(e.into());
            }
        };

        let status = self.detector.status(succeeded).render(&now, &self.address);
        tracing::debug!(outcome = outcome.as_str(), status = %status, "Tick");

        if let Some(journal) = &self.journal {
            if let Err(e) = journal.append(now.date_naive(), &status).await {
                tracing::warn!(error = %e, "Failed to append status line");
            }
        }

        if let Some(event) = &event {
            let message = event.render(&now, &self.address);
            tracing::info!(kind = event.kind(), message = %message, "Alert raised");
            self.notifier.dispatch(&message).await;
        }

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::{AlertError, AlertSink};
    use crate::health::{FailureDetector, LossDetector};
    use crate::probe::ProbeOutcome;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Replays a fixed list of outcomes, then keeps succeeding.
    struct Scripted {
        outcomes: Mutex<VecDeque<Result<ProbeOutcome, ProbeError>>>,
    }

    impl Scripted {
        fn new(outcomes: Vec<ProbeOutcome>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into_iter().map(Ok).collect()),
            }
        }

        fn failing() -> Self {
            let err = ProbeError::Spawn {
                program: "ping".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            };
            Self {
                outcomes: Mutex::new(VecDeque::from([Err(err)])),
            }
        }
    }

    #[async_trait]
    impl Prober for Scripted {
        async fn probe(&self) -> Result<ProbeOutcome, ProbeError> {
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(ProbeOutcome::Success))
        }
    }

    #[derive(Clone, Default)]
    struct Recording(Arc<Mutex<Vec<String>>>);

    #[async_trait]
    impl AlertSink for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        async fn send(&self, message: &str) -> Result<(), AlertError> {
            self.0.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn test_tcp_ticks_deliver_alerts() {
        use ProbeOutcome::*;
        let sink = Recording::default();
        let mut monitor = Monitor::new(
            "db.example",
            Duration::from_secs(1),
            Box::new(Scripted::new(vec![Timeout, ResolutionFailed, Timeout, Timeout, Success])),
            Box::new(FailureDetector::new(5432, 3)),
            Notifier::new().with_sink(sink.clone()),
        );

        let mut events = Vec::new();
        for _ in 0..6 {
            events.push(monitor.tick(now()).await.unwrap());
        }

        assert_eq!(events[2], Some(AlertEvent::ConnectionFailed { port: 5432 }));
        assert_eq!(events[4], Some(AlertEvent::ConnectionRestored { port: 5432 }));
        assert_eq!(events.iter().flatten().count(), 2);

        let messages = sink.0.lock().unwrap().clone();
        assert_eq!(
            messages,
            vec![
                "Mon, 2024-01-15 09:30:00 TCP connection to db.example failed on port 5432".to_string(),
                "Mon, 2024-01-15 09:30:00 TCP connection to db.example succeeded on port 5432".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_icmp_ticks_write_journal() {
        let dir = tempfile::tempdir().unwrap();
        let journal = crate::journal::DailyLogFile::new(dir.path(), "10.1.1.1", "icmp");
        let path = journal.path_for(now().date_naive());

        let mut monitor = Monitor::new(
            "10.1.1.1",
            Duration::from_secs(1),
            Box::new(Scripted::new(vec![ProbeOutcome::Success, ProbeOutcome::NoReply])),
            Box::new(LossDetector::new(4, 5.0)),
            Notifier::new(),
        )
        .with_journal(journal);

        assert_eq!(monitor.tick(now()).await.unwrap(), None);
        assert_eq!(
            monitor.tick(now()).await.unwrap(),
            Some(AlertEvent::LossIncreased { from: 0.0, to: 50.0 })
        );

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Packet loss for 10.1.1.1 is 0%"));
        assert!(lines[1].ends_with("Packet loss for 10.1.1.1 is 50%"));
    }

    #[tokio::test]
    async fn test_fatal_probe_error_stops_tick() {
        let mut monitor = Monitor::new(
            "10.1.1.1",
            Duration::from_secs(1),
            Box::new(Scripted::failing()),
            Box::new(LossDetector::new(4, 5.0)),
            Notifier::new(),
        );

        assert!(matches!(monitor.tick(now()).await, Err(MonitorError::Probe(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ticks_until_shutdown() {
        let sink = Recording::default();
        let monitor = Monitor::new(
            "10.1.1.1",
            Duration::from_secs(1),
            Box::new(Scripted::new(vec![ProbeOutcome::NoReply])),
            Box::new(LossDetector::new(10, 5.0)),
            Notifier::new().with_sink(sink.clone()),
        );

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(monitor.run(async move {
            let _ = rx.await;
        }));

        time::sleep(Duration::from_millis(3500)).await;
        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();

        // Tick 1 fails (100%), ticks 2 and 3 succeed (50%, 33%).
        let messages = sink.0.lock().unwrap().clone();
        assert_eq!(messages.len(), 3);
        assert!(messages[0].ends_with("increased from 0% to 100%"));
        assert!(messages[1].ends_with("decreased from 100% to 50%"));
        assert!(messages[2].ends_with("decreased from 50% to 33.33%"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_exits_before_first_tick_when_already_stopped() {
        let sink = Recording::default();
        let monitor = Monitor::new(
            "10.1.1.1",
            Duration::from_secs(1),
            Box::new(Scripted::failing()),
            Box::new(LossDetector::new(10, 5.0)),
            Notifier::new().with_sink(sink.clone()),
        );

        // The failing prober would end the run with an error if it were reached.
        monitor.run(std::future::ready(())).await.unwrap();
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_fatal_error() {
        let monitor = Monitor::new(
            "10.1.1.1",
            Duration::from_secs(1),
            Box::new(Scripted::failing()),
            Box::new(LossDetector::new(10, 5.0)),
            Notifier::new(),
        );

        let result = monitor.run(std::future::pending()).await;
        assert!(matches!(result, Err(MonitorError::Probe(ProbeError::Spawn { .. }))));
    }
}
