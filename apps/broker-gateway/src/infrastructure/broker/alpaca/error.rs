//! Alpaca-specific error types.

use thiserror::Error;

use crate::application::ports::GatewayError;

/// Errors from the Alpaca adapter.
#[derive(Debug, Error, Clone)]
pub enum AlpacaError {
    /// HTTP request never produced a response.
    #[error("HTTP error: {0}")]
    Http(String),

    /// API returned an error status.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code from the API.
        status: u16,
        /// Error message, taken from the response body when it carried one.
        message: String,
        /// Raw error body, when it was JSON.
        body: Option<serde_json::Value>,
    },

    /// Response body could not be parsed.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),
}

impl From<AlpacaError> for GatewayError {
    fn from(err: AlpacaError) -> Self {
        match err {
            AlpacaError::Http(message) => Self::Transport { message },
            AlpacaError::Api {
                status,
                message,
                body,
            } => Self::Upstream {
                status,
                message,
                body,
            },
            AlpacaError::JsonParse(message) => Self::Decode { message },
        }
    }
}
