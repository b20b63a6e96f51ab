mod types;

pub use types::*;

use crate::{Error, Result};
use reqwest::Url;
use std::env;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Loads configuration at cold start.
///
/// `CONFIG_PATH` optionally names a YAML file; `API_ENDPOINT` and `LOG_LEVEL`
/// override whatever the file provides. The result is validated so a missing
/// or unusable endpoint stops the function before it serves any request.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").ok();
    let overrides = Overrides {
        endpoint: env::var("API_ENDPOINT").ok(),
        log_level: env::var("LOG_LEVEL").ok(),
    };

    load_from(config_path.as_deref(), overrides).await
}

pub async fn load_from(config_path: Option<&str>, overrides: Overrides) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => {
            debug!("Loading configuration from: {}", path);
            let config_str = tokio::fs::read_to_string(path).await?;
            serde_yaml::from_str(&config_str)?
        }
        None => Config::default(),
    };

    config.apply(overrides);
    validate(&config)?;

    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    let endpoint = config.inference.endpoint.trim();
    if endpoint.is_empty() {
        return Err(Error::config(
            "inference endpoint is not set (expected API_ENDPOINT or inference.endpoint)",
        ));
    }

    let url = Url::parse(endpoint)
        .map_err(|e| Error::config(format!("Invalid inference endpoint '{}': {}", endpoint, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "Inference endpoint must use http or https, got '{}'",
            url.scheme()
        )));
    }

    validate_log_level(&config.logs.level)
}

/// Builds the log filter from a level or a full filter directive string
/// such as `info,hyper=warn`.
pub fn log_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| {
        Error::config(format!(
            "Invalid log level: '{}' ({}). Valid levels: error, warn, info, debug, trace, \
             optionally with target directives such as 'info,hyper=warn'",
            level, e
        ))
    })
}

pub fn validate_log_level(level: &str) -> Result<()> {
    log_filter(level).map(|_| ())
}
