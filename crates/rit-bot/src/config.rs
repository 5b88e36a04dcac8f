//! Application configuration.

use crate::error::{AppError, AppResult};
use rit_mm::QuotingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default config file location.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "RIT_CONFIG";

/// Env var overriding `api_key`.
pub const API_KEY_ENV: &str = "RIT_API_KEY";

/// Operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    /// Full decision loop, orders are logged instead of sent.
    #[default]
    Observation,
    /// Orders are sent to the RIT API.
    Trading,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetryConfig {
    /// Serve Prometheus metrics over HTTP.
    #[serde(default)]
    pub metrics_enabled: bool,
    /// Prometheus metrics port.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
}

fn default_metrics_port() -> u16 {
    9090
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_port: default_metrics_port(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Operating mode.
    #[serde(default)]
    pub mode: OperatingMode,
    /// RIT client API root.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// RIT API key, sent as `X-API-key`. Overridden by `RIT_API_KEY`.
    #[serde(default)]
    pub api_key: String,
    /// Instrument to quote.
    #[serde(default = "default_ticker")]
    pub ticker: String,
    /// Pause between cycles (ms).
    #[serde(default = "default_cycle_delay_ms")]
    pub cycle_delay_ms: u64,
    /// Per-request HTTP timeout (ms).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Position limits and cost parameters.
    #[serde(default)]
    pub quoting: QuotingConfig,
    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_base_url() -> String {
    "http://localhost:9999/v1".to_string()
}

fn default_ticker() -> String {
    "ALGO".to_string()
}

fn default_cycle_delay_ms() -> u64 {
    900
}

fn default_request_timeout_ms() -> u64 {
    2_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: OperatingMode::Observation,
            base_url: default_base_url(),
            api_key: String::new(),
            ticker: default_ticker(),
            cycle_delay_ms: default_cycle_delay_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            quoting: QuotingConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Resolve the config path: explicit path > `RIT_CONFIG` > default.
    pub fn resolve_path(explicit: Option<String>) -> String {
        explicit
            .or_else(|| std::env::var(CONFIG_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
    }

    /// Load configuration, falling back to defaults when the file is absent,
    /// then apply the `RIT_API_KEY` override.
    pub fn load(path: &str) -> AppResult<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            Self::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.apply_api_key_override(key);
        }

        Ok(config)
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        Self::from_toml(&content)
    }

    /// Parse from TOML text.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    fn apply_api_key_override(&mut self, key: String) {
        if !key.is_empty() {
            self.api_key = key;
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> AppResult<()> {
        self.quoting.validate()?;

        if self.ticker.trim().is_empty() {
            return Err(AppError::Config("ticker must not be empty".to_string()));
        }
        if self.cycle_delay_ms == 0 {
            return Err(AppError::Config(
                "cycle_delay_ms must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(AppError::Config(
                "request_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "base_url ({}) must be an http(s) URL",
                self.base_url
            )));
        }
        if self.mode == OperatingMode::Trading && self.api_key.is_empty() {
            return Err(AppError::Config(format!(
                "api_key (or {API_KEY_ENV}) is required in trading mode"
            )));
        }

        Ok(())
    }

    /// Check if in observation mode.
    pub fn is_observation_mode(&self) -> bool {
        self.mode == OperatingMode::Observation
    }

    pub fn cycle_delay(&self) -> Duration {
        Duration::from_millis(self.cycle_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
