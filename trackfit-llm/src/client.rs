//! LLM client for one Ollama-compatible generate endpoint.
//!
//! Each call is a single `POST {base_url}/api/generate` with streaming
//! disabled and zero temperature. There is no retry: a failed call is
//! reported to the caller, which decides whether the run continues.

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::LlmError;
use crate::types::{GenerateBody, GenerateOptions, GenerateReply, LlmRequest, LlmResponse};

/// Client bound to one inference server and one model.
#[derive(Debug, Clone)]
pub struct LlmClient {
    base_url: String,
    model: String,
    http: Client,
}

impl LlmClient {
    /// Create a new client for `model` served at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            http: Client::new(),
        }
    }

    /// The model identifier sent with each request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The server base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one prompt and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Timeout`] when the server does not answer within
    /// `request.timeout_ms`, [`LlmError::Unavailable`] when it cannot be
    /// reached, [`LlmError::HttpStatus`] for a non-success status, and
    /// [`LlmError::ParseError`] when the body lacks a `response` string.
    pub async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateBody {
            model: &self.model,
            prompt: &request.prompt,
            stream: false,
            options: GenerateOptions { temperature: 0.0 },
        };

        let start = Instant::now();
        let resp = self
            .http
            .post(&url)
            .json(&body)
            .timeout(Duration::from_millis(request.timeout_ms))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!("Ollama request timed out after {}ms", request.timeout_ms);
                    LlmError::Timeout(request.timeout_ms)
                } else {
                    warn!("Ollama request failed: {e}");
                    LlmError::from(e)
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Ollama returned error");
            return Err(LlmError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateReply = resp
            .json()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))?;

        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(model = %self.model, latency_ms, "LLM call completed");

        Ok(LlmResponse {
            text: reply.response,
            tokens_generated: reply
                .eval_count
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0),
            latency_ms,
            model: self.model.clone(),
        })
    }
}
