//! TCP port-connect probe.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;

use crate::probe::{ProbeError, ProbeOutcome, Prober};

/// Opens (and immediately drops) a TCP connection to `address:port`.
#[derive(Debug, Clone)]
pub struct TcpProber {
    address: String,
    port: u16,
    connect_timeout: Duration,
}

impl TcpProber {
    pub fn new(address: impl Into<String>, port: u16, connect_timeout: Duration) -> Self {
        Self {
            address: address.into(),
            port,
            connect_timeout,
        }
    }

    async fn resolve(&self) -> Option<Vec<SocketAddr>> {
        match lookup_host((self.address.as_str(), self.port)).await {
            Ok(addrs) => {
                let addrs: Vec<SocketAddr> = addrs.collect();
                (!addrs.is_empty()).then_some(addrs)
            }
            Err(e) => {
                tracing::debug!(address = %self.address, error = %e, "Address resolution failed");
                None
            }
        }
    }

    /// Map a connect attempt to an outcome. `None` means the timeout elapsed
    /// before the connect finished.
    fn classify_connect<T>(&self, attempt: Option<io::Result<T>>) -> Result<ProbeOutcome, ProbeError> {
        match attempt {
            Some(Ok(_stream)) => Ok(ProbeOutcome::Success),
            Some(Err(e)) if e.kind() == io::ErrorKind::TimedOut => Ok(ProbeOutcome::Timeout),
            Some(Err(e)) => Err(ProbeError::Connect {
                target: format!("{}:{}", self.address, self.port),
                source: e,
            }),
            None => {
                tracing::debug!(
                    address = %self.address,
                    port = self.port,
                    timeout_secs = self.connect_timeout.as_secs_f64(),
                    "TCP connect timed out"
                );
                Ok(ProbeOutcome::Timeout)
            }
        }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self) -> Result<ProbeOutcome, ProbeError> {
        let Some(addrs) = self.resolve().await else {
            return Ok(ProbeOutcome::ResolutionFailed);
        };

        let attempt = timeout(self.connect_timeout, TcpStream::connect(&addrs[..]))
            .await
            .ok();
        self.classify_connect(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_connects_to_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let prober = TcpProber::new("127.0.0.1", port, Duration::from_secs(2));
        assert_eq!(prober.probe().await.unwrap(), ProbeOutcome::Success);
    }

    #[tokio::test]
    async fn test_unresolvable_name() {
        let prober = TcpProber::new("reachmon-test.invalid", 80, Duration::from_secs(2));
        assert_eq!(prober.probe().await.unwrap(), ProbeOutcome::ResolutionFailed);
    }

    #[tokio::test]
    async fn test_refused_is_fatal() {
        // Grab a free port, then close it so nothing is listening.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };

        let prober = TcpProber::new("127.0.0.1", port, Duration::from_secs(2));
        let err = prober.probe().await.unwrap_err();
        assert!(matches!(err, ProbeError::Connect { .. }));
        assert!(err.to_string().contains(&format!("127.0.0.1:{}", port)));
    }

    #[test]
    fn test_elapsed_timeout_is_a_failed_probe() {
        let prober = TcpProber::new("192.0.2.10", 443, Duration::from_millis(1));
        let outcome = prober.classify_connect::<()>(None).unwrap();
        assert_eq!(outcome, ProbeOutcome::Timeout);
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_os_level_timeout_is_a_failed_probe() {
        let prober = TcpProber::new("192.0.2.10", 443, Duration::from_secs(2));
        let attempt: Option<io::Result<()>> = Some(Err(io::ErrorKind::TimedOut.into()));
        assert_eq!(prober.classify_connect(attempt).unwrap(), ProbeOutcome::Timeout);
    }

    #[test]
    fn test_other_connect_errors_are_fatal() {
        let prober = TcpProber::new("192.0.2.10", 443, Duration::from_secs(2));
        let attempt: Option<io::Result<()>> = Some(Err(io::ErrorKind::PermissionDenied.into()));
        let err = prober.classify_connect(attempt).unwrap_err();
        assert!(err.to_string().starts_with("TCP connection to 192.0.2.10:443 failed"));
    }
}
