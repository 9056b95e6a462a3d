//! # Booking Handlers
//!
//! Create is public (it backs the booking form); listing and removal are
//! admin-only.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use workshop_core::{
    errors::BookingError,
    models::booking::{Booking, CreateBookingRequest, DeleteBookingResponse},
};

use crate::{middleware::auth::RequireAdmin, middleware::error_handling::AppError, ApiState};

/// Lists current and future bookings, pruning past ones on the way.
///
/// # Endpoint
///
/// ```text
/// GET /api/bookings
/// ```
///
/// Always answers 200 for an authorised caller; an unreachable store reads
/// as an empty list.
pub async fn list_bookings(
    _admin: RequireAdmin,
    State(state): State<Arc<ApiState>>,
) -> Json<Vec<Booking>> {
    Json(state.bookings.list(super::today()).await)
}

/// Creates a booking.
///
/// # Endpoint
///
/// ```text
/// POST /api/bookings
/// ```
///
/// # Errors
///
/// * `400` - malformed body or a request the slot engine rejects
/// * `409` - one of the requested hours is taken, `hour` names the first one
/// * `503` - the store could not be read or written
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    body: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let Json(request) = body.map_err(|e| AppError(BookingError::Validation(e.body_text())))?;

    let booking = state.bookings.create(request, Utc::now()).await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Removes a booking by id.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/bookings/:id
/// ```
pub async fn delete_booking(
    _admin: RequireAdmin,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteBookingResponse>, AppError> {
    state.bookings.remove(&id).await?;

    Ok(Json(DeleteBookingResponse { success: true }))
}
