use std::fmt;

use async_trait::async_trait;
use eyre::{bail, eyre, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::config::NotifierConfig;

/// Telegram chat identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outbound side of the chat bot.
///
/// Texts are sent with HTML parse mode.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<()>;

    async fn send_photo(&self, chat: ChatId, photo: &str, caption: &str) -> Result<()>;
}

/// Minimal Telegram Bot API client.
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(config: &NotifierConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.send_timeout())
            .build()
            .map_err(|e| eyre!("Failed to build Telegram HTTP client: {}", e))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.bot_token.clone(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call(&self, method: &str, body: serde_json::Value) -> Result<()> {
        // The request URL carries the bot token, keep it out of error messages
        let response = self
            .http
            .post(self.method_url(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| eyre!("Telegram {} request failed: {}", method, e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("Telegram {} returned {}: {}", method, status, detail);
        }

        debug!(method, "Telegram call succeeded");
        Ok(())
    }
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<()> {
        self.call(
            "sendMessage",
            json!({
                "chat_id": chat.0,
                "text": text,
                "parse_mode": "HTML",
            }),
        )
        .await
    }

    async fn send_photo(&self, chat: ChatId, photo: &str, caption: &str) -> Result<()> {
        self.call(
            "sendPhoto",
            json!({
                "chat_id": chat.0,
                "photo": photo,
                "caption": caption,
                "parse_mode": "HTML",
            }),
        )
        .await
    }
}
