use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use salon_core::{
    errors::SalonError,
    models::announcement::{Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest},
};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn list_active_announcements(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Announcement>>, AppError> {
    let rows = salon_db::repositories::announcement::list_active_announcements(&state.db_pool)
        .await
        .map_err(SalonError::Database)?;

    Ok(Json(rows.into_iter().map(Announcement::from).collect()))
}

#[axum::debug_handler]
pub async fn list_announcements(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Announcement>>, AppError> {
    let rows = salon_db::repositories::announcement::list_announcements(&state.db_pool)
        .await
        .map_err(SalonError::Database)?;

    Ok(Json(rows.into_iter().map(Announcement::from).collect()))
}

#[axum::debug_handler]
pub async fn create_announcement(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>), AppError> {
    payload.validate()?;

    let row = salon_db::repositories::announcement::create_announcement(
        &state.db_pool,
        payload.title.trim(),
        payload.message.trim(),
        payload.is_active,
    )
    .await
    .map_err(SalonError::Database)?;

    tracing::info!("Created announcement {}", row.id);

    Ok((StatusCode::CREATED, Json(Announcement::from(row))))
}

#[axum::debug_handler]
pub async fn update_announcement(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAnnouncementRequest>,
) -> Result<Json<Announcement>, AppError> {
    let title = payload.title.as_deref().map(str::trim);
    let message = payload.message.as_deref().map(str::trim);
    if title.is_some_and(str::is_empty) || message.is_some_and(str::is_empty) {
        return Err(AppError(SalonError::Validation(
            "Title and message cannot be empty".to_string(),
        )));
    }

    let row = salon_db::repositories::announcement::update_announcement(
        &state.db_pool,
        id,
        title,
        message,
        payload.is_active,
    )
    .await
    .map_err(SalonError::Database)?
    .ok_or_else(|| SalonError::NotFound(format!("Announcement with ID {} not found", id)))?;

    Ok(Json(Announcement::from(row)))
}

#[axum::debug_handler]
pub async fn delete_announcement(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = salon_db::repositories::announcement::delete_announcement(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?;

    if !deleted {
        return Err(AppError(SalonError::NotFound(format!(
            "Announcement with ID {} not found",
            id
        ))));
    }

    Ok(StatusCode::NO_CONTENT)
}
