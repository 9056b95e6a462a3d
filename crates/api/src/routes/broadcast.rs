use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::broadcast, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/broadcast",
        get(broadcast::list_subscribers).post(broadcast::send_broadcast),
    )
}
