use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use workshop_notifier::{handlers::handle_update, updates::TelegramUpdate};

use crate::{middleware::error_handling::AppError, ApiState};

/// Telegram webhook. Records the author as a subscriber and answers bot
/// commands.
///
/// # Endpoint
///
/// ```text
/// POST /api/telegram/webhook
/// ```
///
/// Answers `{"ok": true}` once the subscriber is stored, whether or not the
/// reply went out. A store failure answers 503 so Telegram redelivers.
pub async fn webhook(
    State(state): State<Arc<ApiState>>,
    Json(update): Json<TelegramUpdate>,
) -> Result<Json<Value>, AppError> {
    handle_update(
        update,
        state.subscribers.as_ref(),
        state.messenger.as_deref(),
        state.bookings.schedule(),
        Utc::now(),
    )
    .await?;

    Ok(Json(json!({ "ok": true })))
}
