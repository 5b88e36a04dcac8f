//! RIT passive market-making bot.
//!
//! Main application that orchestrates all components:
//! - Configuration loading and validation
//! - RIT REST client (trading) or logging sink (observation)
//! - Quoting loop over the decision engine
//! - Metrics endpoint and session summary

pub mod app;
pub mod config;
pub mod error;
pub mod metrics_server;
pub mod sink;

pub use app::Application;
pub use config::{AppConfig, OperatingMode, TelemetryConfig};
pub use error::{AppError, AppResult};
pub use sink::ObservationSink;
