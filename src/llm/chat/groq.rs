use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use super::ChatClient;
use crate::llm::{CompletionError, LlmConfig};
use async_trait::async_trait;

const DEFAULT_BASE_URL: &str = "https://api.groq.com";
const COMPLETIONS_ROUTE: &str = "/openai/v1/chat/completions";

/// Persona instruction sent as the fixed system message on every request.
const SYSTEM_PROMPT: &str = "أجب كأنك خدمة عملاء لأكاديمية لتحفيظ القرآن.";
const TEMPERATURE: f32 = 0.5;

pub struct GroqChatClient {
    http: HttpClient,
    api_key: String,
    model: String,
    url: String,
}

#[derive(Serialize, Deserialize)]
struct GroqMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<GroqMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Deserialize)]
struct GroqChoice {
    message: GroqMessage,
}

impl GroqChatClient {
    pub fn new(api_key: String, model: String, base_url: Option<String>) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_ROUTE);

        Self {
            http: HttpClient::new(),
            api_key,
            model,
            url,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, CompletionError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(CompletionError::MissingApiKey)?;

        Ok(Self::new(
            api_key,
            config.model.clone(),
            config.base_url.clone(),
        ))
    }
}

#[async_trait]
impl ChatClient for GroqChatClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let req = GroqRequest {
            model: self.model.clone(),
            messages: vec![
                GroqMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                GroqMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
        };

        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status, body });
        }

        let parsed = resp.json::<GroqResponse>().await?;
        let content = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(CompletionError::EmptyResponse)?;

        Ok(content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
