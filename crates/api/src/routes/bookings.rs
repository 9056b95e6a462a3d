use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers::bookings, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/api/bookings/:id", delete(bookings::delete_booking))
}
