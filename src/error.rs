use thiserror::Error;

/// Failure taxonomy for a proxied tool call. The `Display` form of each
/// variant is the exact text surfaced to the MCP caller.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("arXiv proxy service is currently offline.")]
    Offline,

    #[error("PDF download failed: {0}")]
    UpstreamStatus(u16),

    #[error("Error: {0}")]
    Transport(String),

    #[error("config error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
