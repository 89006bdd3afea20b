//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → Prober + Detector + Notifier + Journal → Monitor
//!
//! Shutdown (signals.rs):
//!     SIGTERM/SIGINT → shutdown future resolves → Monitor leaves its loop → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The probe mode is fixed here and never revisited

pub mod signals;
pub mod startup;

pub use startup::{build_monitor, StartupError};
