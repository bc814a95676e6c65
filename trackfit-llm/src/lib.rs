//! # trackfit-llm: inference client for trackfit
//!
//! Talks to a locally hosted, Ollama-compatible language-model server:
//!
//! ```text
//! POST {base_url}/api/generate
//! {"model": "...", "prompt": "...", "stream": false, "options": {"temperature": 0}}
//!
//! 200 OK
//! {"response": "REPS_WEIGHT", ...}
//! ```
//!
//! The crate knows nothing about exercises; it sends a prompt and hands back
//! the generated text. Prompt templates live in [`prompt`].

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use types::{LlmRequest, LlmResponse};
