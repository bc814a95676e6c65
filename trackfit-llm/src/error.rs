//! LLM error types.

use thiserror::Error;

/// Errors that can occur while calling the inference endpoint.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed.
    #[error("LLM request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-success status.
    #[error("LLM server returned HTTP {status}: {body}")]
    HttpStatus {
        /// Status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// LLM response was not valid JSON or lacked the text field.
    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    /// Request timed out.
    #[error("LLM request timed out after {0}ms")]
    Timeout(u64),

    /// LLM provider is unavailable (connection refused, DNS failure).
    #[error("LLM provider unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(0)
        } else if err.is_connect() {
            LlmError::Unavailable(err.to_string())
        } else if err.is_decode() {
            LlmError::ParseError(err.to_string())
        } else {
            LlmError::RequestFailed(err.to_string())
        }
    }
}
