use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use super::types::User;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Telegram API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Telegram API error: {0}")]
    Api(String),
}

/// Envelope every Bot API method responds with.
#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    description: Option<String>,
    result: Option<T>,
}

/// Outbound Bot API client. Cheap to clone, no state beyond the token.
#[derive(Clone)]
pub struct TelegramBot {
    http: HttpClient,
    token: String,
    base_url: String,
}

impl TelegramBot {
    pub fn new(token: String, base_url: Option<String>) -> Self {
        Self {
            http: HttpClient::new(),
            token,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url.trim_end_matches('/'),
            self.token,
            method
        )
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &serde_json::Value,
    ) -> Result<T, TelegramError> {
        let resp = self
            .http
            .post(self.method_url(method))
            .json(payload)
            .send()
            .await?;

        let body = resp.json::<ApiResponse<T>>().await?;
        if !body.ok {
            let description = body
                .description
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(TelegramError::Api(description));
        }

        body.result
            .ok_or_else(|| TelegramError::Api("response carried no result".to_string()))
    }

    /// Deliver `text` to the originating chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        let payload = json!({ "chat_id": chat_id, "text": text });
        self.call::<serde_json::Value>("sendMessage", &payload)
            .await?;
        Ok(())
    }

    /// Register the bot's command menu with Telegram.
    pub async fn set_my_commands(&self) -> Result<(), TelegramError> {
        let payload = json!({
            "commands": [
                { "command": "start", "description": "بدء المحادثة مع البوت" }
            ]
        });
        self.call::<serde_json::Value>("setMyCommands", &payload)
            .await?;
        Ok(())
    }

    /// Fetch the bot's own account, used to verify the token at startup.
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call::<User>("getMe", &json!({})).await
    }
}
