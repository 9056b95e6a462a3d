use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use workshop_core::{dates, errors::BookingError, models::booking::Availability};

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    /// `YYYY-MM-DD`; the coming Saturday when absent
    pub date: Option<String>,
}

/// Free slots for a date and the longest booking each one allows.
///
/// # Endpoint
///
/// ```text
/// GET /api/slots?date=2026-10-24
/// ```
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Availability>, AppError> {
    let today = super::today();

    let date = match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            AppError(BookingError::Validation(format!(
                "Invalid date '{}', expected YYYY-MM-DD",
                raw
            )))
        })?,
        None => dates::next_saturday(today),
    };

    Ok(Json(state.bookings.availability(date, today).await))
}
