use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single generation or upload attempt. None of these are
/// retried; the session controller turns them into transcript entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upload URL not found in upload session response")]
    UploadSessionMissing,

    #[error("Invalid response format: {0}")]
    Malformed(String),

    #[error("Image conversion failed: {0}")]
    ImageEncodingFailed(String),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
}

impl ClientError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed(detail.into())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No API key configured (set `api_key` or the {0} environment variable)")]
    MissingApiKey(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("A message is already being sent")]
    Busy,

    #[error("No send is in flight")]
    Idle,

    #[error("No tokio runtime available to run the request")]
    NoRuntime,

    #[error("Completion channel closed before the send finished")]
    CompletionChannelClosed,
}
