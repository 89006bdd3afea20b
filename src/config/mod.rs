//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → command-line overrides (cli.rs)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the probe mode never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::AlertConfig;
pub use schema::IcmpConfig;
pub use schema::JournalConfig;
pub use schema::MonitorConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProbeMode;
pub use schema::TcpConfig;
