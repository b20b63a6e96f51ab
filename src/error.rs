use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed request body: {0}")]
    MalformedInput(String),

    #[error("Request body is missing required field 'message'")]
    MissingMessage,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response from inference endpoint: {0}")]
    UnexpectedUpstreamShape(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn malformed_input(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn upstream_shape(msg: impl Into<String>) -> Self {
        Self::UnexpectedUpstreamShape(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the failure happened on the wire to the inference endpoint.
    /// These are rendered with the bare `{"error": ...}` body and no headers.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
