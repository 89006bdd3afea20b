//! ICMP echo probe backed by the platform `ping` utility.
//!
//! Raw ICMP sockets need elevated privileges, so the probe shells out and
//! only looks at the exit status: `0` means every echo was answered.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::probe::{ProbeError, ProbeOutcome, Prober};

/// Default executable name, resolved through `PATH`.
pub const DEFAULT_PING_PROGRAM: &str = "ping";

/// Flag selecting the number of echo requests on this platform.
pub fn count_flag() -> &'static str {
    if cfg!(windows) {
        "-n"
    } else {
        "-c"
    }
}

/// Runs `ping <count-flag> <count> <address>` once per probe.
#[derive(Debug, Clone)]
pub struct PingProber {
    address: String,
    packet_count: u32,
    program: String,
}

impl PingProber {
    pub fn new(address: impl Into<String>, packet_count: u32) -> Self {
        Self {
            address: address.into(),
            packet_count,
            program: DEFAULT_PING_PROGRAM.to_string(),
        }
    }

    /// Use a different executable (absolute path or `PATH` lookup).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments passed to the ping program.
    pub fn args(&self) -> Vec<String> {
        vec![
            count_flag().to_string(),
            self.packet_count.to_string(),
            self.address.clone(),
        ]
    }
}

#[async_trait]
impl Prober for PingProber {
    async fn probe(&self) -> Result<ProbeOutcome, ProbeError> {
        let status = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(ProbeOutcome::Success)
        } else {
            tracing::debug!(address = %self.address, status = %status, "Ping reported loss");
            Ok(ProbeOutcome::NoReply)
        }
    }
}
