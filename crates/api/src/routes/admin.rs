use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, middleware::auth, ApiState};

/// Admin routes; everything except key verification sits behind the admin key.
pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    let guarded = Router::new()
        .route(
            "/api/admin/services",
            get(handlers::service::list_all_services).post(handlers::service::create_service),
        )
        .route(
            "/api/admin/services/:id",
            put(handlers::service::update_service).delete(handlers::service::delete_service),
        )
        .route(
            "/api/admin/appointments",
            get(handlers::appointment::list_appointments),
        )
        .route(
            "/api/admin/appointments/:id/status",
            put(handlers::appointment::update_appointment_status),
        )
        .route(
            "/api/admin/blocked-slots",
            get(handlers::blocked_slot::list_blocked_slots)
                .post(handlers::blocked_slot::create_blocked_slot),
        )
        .route(
            "/api/admin/blocked-slots/:id",
            delete(handlers::blocked_slot::delete_blocked_slot),
        )
        .route(
            "/api/admin/announcements",
            get(handlers::announcement::list_announcements)
                .post(handlers::announcement::create_announcement),
        )
        .route(
            "/api/admin/announcements/:id",
            put(handlers::announcement::update_announcement)
                .delete(handlers::announcement::delete_announcement),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin));

    Router::new()
        .route("/api/admin/verify", post(handlers::admin::verify_admin_key))
        .merge(guarded)
}
