//! Core types for LLM requests and responses.

use serde::{Deserialize, Serialize};

/// A request to the generate endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LlmRequest {
    /// Full prompt text.
    pub prompt: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl LlmRequest {
    /// Create a request with the default 60 s timeout.
    #[must_use]
    pub fn deterministic(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            timeout_ms: 60_000,
        }
    }

    /// Set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Wire body for Ollama's `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GenerateBody<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    pub options: GenerateOptions,
}

/// Sampling options sent with every request. Temperature is always zero.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GenerateOptions {
    pub temperature: f32,
}

/// Wire reply from `POST /api/generate` (non-streaming).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenerateReply {
    pub response: String,
    #[serde(default)]
    pub eval_count: Option<u64>,
}

/// A response from the LLM.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    /// The generated text, untrimmed.
    pub text: String,
    /// How many tokens were generated, when the server reports it.
    pub tokens_generated: u32,
    /// Latency in milliseconds.
    pub latency_ms: u64,
    /// Which model was used.
    pub model: String,
}
