//! Error types for qiita-connect.

use thiserror::Error;

/// Primary error type for all flow operations.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authorization exchange failed (status {status}): {body}")]
    AuthExchange { status: u16, body: String },

    #[error("Access token rejected by the provider")]
    Unauthorized,

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("State token mismatch: expected {expected}, got {received}")]
    StateMismatch { expected: String, received: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl FlowError {
    /// Whether recovering from this error requires restarting the flow from
    /// a fresh authorization URL.
    ///
    /// Authorization codes are single-use by provider contract, so a failed
    /// exchange must never be retried with the same code.
    pub fn requires_new_authorization(&self) -> bool {
        matches!(
            self,
            Self::AuthExchange { .. } | Self::StateMismatch { .. }
        )
    }
}

impl From<reqwest::Error> for FlowError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<serde_json::Error> for FlowError {
    fn from(error: serde_json::Error) -> Self {
        Self::MalformedResponse(error.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FlowError>;
