//! AI-backed refactoring suggestions
//!
//! BYOK (bring your own key): API keys come from environment variables.
//! The suggestion call sits outside the detection pipeline; its failures
//! are rendered into the returned text and never propagate into analysis.
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY`: Required for the OpenAI backend
//! - `ANTHROPIC_API_KEY`: Required for the Anthropic backend
//! - `OLLAMA_MODEL`: Optional model override for a local Ollama server

mod client;
mod prompts;
mod suggest;

pub use client::{AiClient, AiConfig, LlmBackend};
pub use prompts::{build_suggestion_prompt, SYSTEM_PROMPT};
pub use suggest::SuggestionGenerator;

use thiserror::Error;

/// Errors that can occur at the suggestion boundary
#[derive(Error, Debug)]
pub enum AiError {
    #[error("missing API key: {env_var} not set")]
    MissingApiKey { env_var: String },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("failed to parse API response: {0}")]
    ParseError(String),
}

pub type AiResult<T> = Result<T, AiError>;
