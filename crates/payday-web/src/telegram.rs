//! Thin Telegram Bot API client.

use payday::{ChatId, Messenger, SendError};
use serde::Deserialize;

pub struct TelegramApi {
    client: reqwest::Client,
    base: String,
}

/// Envelope every Bot API method returns.
#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramApi {
    pub fn new(token: &str) -> Self {
        TelegramApi {
            client: reqwest::Client::new(),
            base: format!("https://api.telegram.org/bot{token}"),
        }
    }

    async fn call(&self, method: &str, payload: &serde_json::Value) -> Result<(), SendError> {
        let response = self
            .client
            .post(format!("{}/{method}", self.base))
            .json(payload)
            .send()
            .await
            .map_err(|e| SendError::Http(e.to_string()))?;
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| SendError::Http(e.to_string()))?;
        if body.ok {
            Ok(())
        } else {
            Err(SendError::Api(
                body.description.unwrap_or_else(|| "no description".into()),
            ))
        }
    }

    /// Points Telegram's update delivery at our public URL.
    pub async fn set_webhook(&self, url: &str) -> Result<(), SendError> {
        self.call("setWebhook", &serde_json::json!({ "url": url }))
            .await
    }
}

impl Messenger for TelegramApi {
    async fn send_message(&self, chat: ChatId, text: &str) -> Result<(), SendError> {
        self.call(
            "sendMessage",
            &serde_json::json!({ "chat_id": chat, "text": text }),
        )
        .await
    }
}
