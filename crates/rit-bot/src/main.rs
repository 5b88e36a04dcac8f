//! RIT passive market maker - Entry Point
//!
//! Observation mode: full decision loop, orders are only logged
//! Trading mode: orders are sent to the RIT client API

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// RIT passive market maker
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via RIT_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    rit_telemetry::init_logging()?;

    info!("Starting RIT market maker v{}", env!("CARGO_PKG_VERSION"));

    let config_path = rit_bot::AppConfig::resolve_path(args.config);
    info!(config_path = %config_path, "Loading configuration");

    let config = rit_bot::AppConfig::load(&config_path)?;
    config.validate()?;
    info!(
        ?config.mode,
        ticker = %config.ticker,
        base_url = %config.base_url,
        "Configuration loaded"
    );

    let app = rit_bot::Application::new(config)?;
    app.run().await?;

    Ok(())
}
