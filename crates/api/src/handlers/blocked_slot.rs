use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use salon_core::{
    errors::SalonError,
    models::blocked_slot::{BlockedSlotQuery, BlockedSlotRecord, CreateBlockedSlotRequest},
};
use salon_db::models::DbBlockedSlot;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

fn into_records(rows: Vec<DbBlockedSlot>) -> Result<Vec<BlockedSlotRecord>, SalonError> {
    rows.into_iter().map(BlockedSlotRecord::try_from).collect()
}

/// Lists blocked slots, optionally for a single date
#[axum::debug_handler]
pub async fn list_blocked_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<BlockedSlotQuery>,
) -> Result<Json<Vec<BlockedSlotRecord>>, AppError> {
    let rows = match query.date {
        Some(date) => salon_db::repositories::blocked_slot::get_blocked_slots_by_date(&state.db_pool, date).await,
        None => salon_db::repositories::blocked_slot::list_blocked_slots(&state.db_pool).await,
    }
    .map_err(SalonError::Database)?;

    Ok(Json(into_records(rows)?))
}

#[axum::debug_handler]
pub async fn create_blocked_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBlockedSlotRequest>,
) -> Result<(StatusCode, Json<BlockedSlotRecord>), AppError> {
    let time = payload.parsed_time()?;

    let reason = payload
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let row = salon_db::repositories::blocked_slot::create_blocked_slot(
        &state.db_pool,
        payload.date,
        &time.to_string(),
        reason,
    )
    .await
    .map_err(SalonError::Database)?;

    tracing::info!("Blocked {} on {}", time, payload.date);

    Ok((StatusCode::CREATED, Json(BlockedSlotRecord::try_from(row)?)))
}

#[axum::debug_handler]
pub async fn delete_blocked_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = salon_db::repositories::blocked_slot::delete_blocked_slot(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?;

    if !deleted {
        return Err(AppError(SalonError::NotFound(format!(
            "Blocked slot with ID {} not found",
            id
        ))));
    }

    tracing::info!("Unblocked slot {}", id);
    Ok(StatusCode::NO_CONTENT)
}
