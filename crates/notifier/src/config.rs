use eyre::{eyre, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Default Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Configuration for the Telegram notifier.
///
/// Notifications are optional: without a bot token the service runs and
/// simply drops booking events.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Telegram bot token (required)
    pub bot_token: String,
    /// Operator chats that receive a message for every new booking
    pub admin_chat_ids: Vec<i64>,
    /// Base URL of the Bot API
    pub api_base_url: String,
    /// Upper bound for a single Bot API call, in seconds
    pub send_timeout_secs: u64,
    /// Pause between two broadcast messages, in milliseconds
    pub broadcast_delay_ms: u64,
}

impl NotifierConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` when `TELEGRAM_BOT_TOKEN` is not set.
    pub fn from_env() -> Result<Option<Self>> {
        let bot_token = match env::var("TELEGRAM_BOT_TOKEN") {
            Ok(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => return Ok(None),
        };

        let admin_chat_ids = parse_chat_ids(&env::var("TELEGRAM_ADMIN_IDS").unwrap_or_default())?;

        let api_base_url = env::var("TELEGRAM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let send_timeout_secs = env::var("TELEGRAM_SEND_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let broadcast_delay_ms = env::var("TELEGRAM_BROADCAST_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);

        Ok(Some(Self {
            bot_token,
            admin_chat_ids,
            api_base_url,
            send_timeout_secs,
            broadcast_delay_ms,
        }))
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }

    pub fn broadcast_delay(&self) -> Duration {
        Duration::from_millis(self.broadcast_delay_ms)
    }
}

/// Parses a comma-separated list of chat ids, e.g. `917022431, 706357294`.
pub fn parse_chat_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| eyre!("TELEGRAM_ADMIN_IDS contains an invalid chat id: {}", s))
        })
        .collect()
}
