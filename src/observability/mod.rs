//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Consumers:
//!     → stdout (compact text or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured fields (address, port, outcome) on every monitor event
//! - Alerts are always logged, even when a webhook also receives them

pub mod logging;

pub use logging::init_logging;
