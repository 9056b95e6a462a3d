use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chat user who has written to the workshop bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: i64,
    pub chat_id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: String,
    pub subscribed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberListResponse {
    pub users: Vec<Subscriber>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastResponse {
    pub success: bool,
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
}
