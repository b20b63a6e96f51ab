use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// URL the flattened prompt is POSTed to. Required, there is no default.
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Values taken from the process environment that win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn from_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            inference: InferenceConfig {
                endpoint: endpoint.into(),
            },
            logs: LogsConfig::default(),
        }
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(endpoint) = overrides.endpoint {
            self.inference.endpoint = endpoint;
        }
        if let Some(level) = overrides.log_level {
            self.logs.level = level;
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
