//! Configuration file reading.
//!
//! A file only supplies a base layer: command-line overrides are applied on
//! top of it before validation, so a file may leave required fields (such as
//! the target address) unset.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::MonitorConfig;
use crate::config::validation::{join_errors, ValidationError};

/// Reasons the merged configuration cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

/// Parse a TOML file into a [`MonitorConfig`] without validating it.
pub fn read_config(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
