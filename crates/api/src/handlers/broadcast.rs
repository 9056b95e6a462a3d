//! # Broadcast Handlers
//!
//! Admin-only view of bot subscribers and a mass message to all of them.

use axum::{extract::State, Json};
use std::sync::Arc;
use workshop_core::{
    errors::BookingError,
    models::subscriber::{BroadcastRequest, BroadcastResponse, SubscriberListResponse},
};
use workshop_notifier::broadcast::broadcast;

use crate::{middleware::auth::RequireAdmin, middleware::error_handling::AppError, ApiState};

/// # Endpoint
///
/// ```text
/// GET /api/broadcast
/// ```
pub async fn list_subscribers(
    _admin: RequireAdmin,
    State(state): State<Arc<ApiState>>,
) -> Result<Json<SubscriberListResponse>, AppError> {
    let users = state.subscribers.list().await?;
    let count = users.len();

    Ok(Json(SubscriberListResponse { users, count }))
}

/// Sends a message, or a photo with the message as caption, to every
/// subscriber.
///
/// # Endpoint
///
/// ```text
/// POST /api/broadcast
/// ```
///
/// # Errors
///
/// * `400` - neither message nor photo given
/// * `500` - the bot client is not configured
pub async fn send_broadcast(
    _admin: RequireAdmin,
    State(state): State<Arc<ApiState>>,
    Json(request): Json<BroadcastRequest>,
) -> Result<Json<BroadcastResponse>, AppError> {
    let photo = request
        .photo
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    if request.message.trim().is_empty() && photo.is_none() {
        return Err(AppError(BookingError::Validation(
            "Message or photo is required".to_string(),
        )));
    }

    let Some(messenger) = state.messenger.as_deref() else {
        return Err(AppError(BookingError::Internal(
            "Telegram bot is not configured".into(),
        )));
    };

    let subscribers = state.subscribers.list().await?;
    let response = broadcast(
        messenger,
        &subscribers,
        &request.message,
        photo,
        state.broadcast_delay,
    )
    .await;

    Ok(Json(response))
}
