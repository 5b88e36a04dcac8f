//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid quoting configuration: {0}")]
    Core(#[from] rit_core::CoreError),

    #[error("Client error: {0}")]
    Client(#[from] rit_client::ClientError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] rit_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
