use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/services", get(handlers::service::list_active_services))
        .route(
            "/api/announcements",
            get(handlers::announcement::list_active_announcements),
        )
        .route(
            "/api/availability",
            get(handlers::availability::get_availability),
        )
}
