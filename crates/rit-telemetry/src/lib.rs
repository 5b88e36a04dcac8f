//! Prometheus metrics and structured logging for the RIT market maker.
//!
//! Provides:
//! - Prometheus metrics for cycles, quote legs, position and spread
//! - Structured logging with tracing (JSON in production)
//! - End-of-session statistics summary

pub mod error;
pub mod logging;
pub mod metrics;
pub mod session;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
pub use session::{LegStats, SessionReporter, SessionStats};
