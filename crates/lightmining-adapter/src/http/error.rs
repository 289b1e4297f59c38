/*
[INPUT]:  Error sources (HTTP, API, serialization, signing, on-chain)
[OUTPUT]: Structured error types with cause and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or changing retry classification
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the light-mining adapter
#[derive(Error, Debug)]
pub enum LightminingError {
    /// HTTP transport failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error (bad key, bad proxy, bad address)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response decoded fine but a required field was absent
    #[error("Response missing field `{0}`")]
    MissingField(&'static str),

    /// Message signing failed
    #[error("Signing failed: {0}")]
    Signing(String),

    /// On-chain submission failed
    #[error("On-chain submission failed: {0}")]
    Onchain(String),

    /// Every attempt of a retried operation failed
    #[error("{operation} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        operation: &'static str,
        attempts: u32,
        #[source]
        source: Box<LightminingError>,
    },
}

impl LightminingError {
    /// Check if the error is worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LightminingError::Http(_)
                | LightminingError::Api { .. }
                | LightminingError::Serialization(_)
        )
    }

    /// True when the call produced no data because every attempt failed
    pub fn is_exhausted(&self) -> bool {
        matches!(self, LightminingError::RetriesExhausted { .. })
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        LightminingError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for light-mining operations
pub type Result<T> = std::result::Result<T, LightminingError>;
