//! AI helper error types.

use serde::Deserialize;
use thiserror::Error;

/// Errors from the AI content helpers.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error ({error_type}): {message}")]
    Api { error_type: String, message: String },

    /// API key is invalid or expired.
    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    /// Response did not contain usable content.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Error response body from the messages API.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// The nested error detail.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}
