pub mod groq;

use async_trait::async_trait;
use std::sync::Arc;

use super::{CompletionError, LlmConfig};
use self::groq::GroqChatClient;

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Run one chat completion for `prompt` and return the reply text,
    /// trimmed of surrounding whitespace.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    fn model(&self) -> &str;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, CompletionError> {
    let client = GroqChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
