use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use workshop_core::models::booking::Booking;
use workshop_core::models::subscriber::Subscriber;

/// Row of the single-key record table holding the whole booking list.
#[derive(Debug, Clone, FromRow)]
pub struct DbBookingRecord {
    pub key: String,
    pub value: Json<Vec<Booking>>,
    pub version: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubscriber {
    pub user_id: i64,
    pub chat_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub subscribed_at: DateTime<Utc>,
}

impl From<DbSubscriber> for Subscriber {
    fn from(row: DbSubscriber) -> Self {
        Subscriber {
            id: row.user_id,
            chat_id: row.chat_id,
            first_name: row.first_name,
            last_name: row.last_name,
            username: row.username,
            subscribed_at: row.subscribed_at,
        }
    }
}
