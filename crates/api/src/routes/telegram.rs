use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers::telegram, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route("/api/telegram/webhook", post(telegram::webhook))
}
