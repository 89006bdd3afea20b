//! Per-day status log.
//!
//! # Responsibilities
//! - Append one line per tick to a plain-text file
//! - Roll over to a new file at each local calendar day
//! - Keep TCP and ICMP runs for the same address in separate files
//!
//! # Layout
//! ```text
//! <directory>/<address>_<protocol>_<YYYY-MM-DD>.log
//! ```

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Append-only destination for status lines.
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn append(&self, date: NaiveDate, line: &str) -> io::Result<()>;
}

/// Writes to one file per day, address and protocol.
#[derive(Debug, Clone)]
pub struct DailyLogFile {
    directory: PathBuf,
    address: String,
    protocol: &'static str,
}

impl DailyLogFile {
    pub fn new(directory: impl Into<PathBuf>, address: impl Into<String>, protocol: &'static str) -> Self {
        Self {
            directory: directory.into(),
            address: address.into(),
            protocol,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File receiving lines for `date`.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.directory.join(format!(
            "{}_{}_{}.log",
            file_safe(&self.address),
            self.protocol,
            date.format("%Y-%m-%d")
        ))
    }
}

#[async_trait]
impl LogSink for DailyLogFile {
    async fn append(&self, date: NaiveDate, line: &str) -> io::Result<()> {
        fs::create_dir_all(&self.directory).await?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(date))
            .await?;

        let mut entry = String::with_capacity(line.len() + 1);
        entry.push_str(line);
        entry.push('\n');
        file.write_all(entry.as_bytes()).await?;
        file.flush().await
    }
}

/// IPv6 literals contain ':' which is not allowed in Windows file names.
fn file_safe(address: &str) -> String {
    address
        .chars()
        .map(|c| match c {
            ':' | '/' | '\\' | '%' => '_',
            other => other,
        })
        .collect()
}
