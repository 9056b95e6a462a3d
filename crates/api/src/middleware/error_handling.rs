//! # Error Handling Middleware
//!
//! Maps [`BookingError`] onto HTTP status codes and a JSON body of the form
//! `{ "error": "..." }`. Conflicts also carry the colliding hour so the
//! booking form can point at it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use workshop_core::errors::BookingError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use workshop_api::middleware::error_handling::AppError;
/// use workshop_core::errors::BookingError;
///
/// async fn handler(id: String) -> Result<Json<String>, AppError> {
///     if id.is_empty() {
///         return Err(AppError(BookingError::Validation("id is required".to_string())));
///     }
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Conflict { .. } => StatusCode::CONFLICT,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Authentication(_) => StatusCode::UNAUTHORIZED,
            BookingError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Request failed");
        }

        let body = match &self.0 {
            BookingError::Conflict { hour } => json!({ "error": message, "hour": hour }),
            _ => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

/// Allows `?` on `BookingResult` in handlers
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Infrastructure failures (stores, bot client) surface as 503
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::StoreUnavailable(err))
    }
}
