use anyhow::Result;
use chat_relay::{config, handler};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Determine log level: RUST_LOG overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    let filter = match config::log_filter(&log_level) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // CloudWatch stamps ingestion time itself
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .json()
        .init();

    info!("Starting chat relay with log level: {}", log_level);

    handler::run(config)
        .await
        .map_err(|e| anyhow::anyhow!("Lambda runtime exited: {}", e))?;

    Ok(())
}
