//! Subset of the Telegram `Update` object delivered to the webhook.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use workshop_core::models::subscriber::Subscriber;

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUpdate {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramMessage {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<TelegramUser>,
    pub chat: TelegramChat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl TelegramMessage {
    /// Subscriber record for the message author, if the message has one.
    pub fn subscriber(&self, now: DateTime<Utc>) -> Option<Subscriber> {
        let user = self.from.as_ref()?;
        Some(Subscriber {
            id: user.id,
            chat_id: self.chat.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone().unwrap_or_default(),
            username: user.username.clone().unwrap_or_default(),
            subscribed_at: now,
        })
    }
}
