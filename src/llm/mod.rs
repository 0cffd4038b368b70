pub mod chat;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Groq API key is required")]
    MissingApiKey,
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("completion response contained no choices")]
    EmptyResponse,
}
