use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("invalid endpoint url for '{endpoint}': {message}")]
    InvalidUrl { endpoint: String, message: String },
    #[error("request to '{endpoint}' failed: {message}")]
    Network { endpoint: String, message: String },
    #[error("'{endpoint}' returned HTTP {status}: {}", .error.message)]
    Status {
        endpoint: String,
        status: u16,
        error: ApiError,
    },
    #[error("malformed response from '{endpoint}': {message}")]
    Decode { endpoint: String, message: String },
}

impl TransportError {
    /// Whether repeating the same request can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status { error, .. } => {
                matches!(error.code, ErrorCode::Unavailable | ErrorCode::Internal)
            }
            Self::InvalidUrl { .. } | Self::Decode { .. } => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("base url '{url}' is invalid: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("invalid value '{value}' for setting '{key}': {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
    #[error("failed to parse settings file: {0}")]
    File(#[from] toml::de::Error),
}
