use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use salon_core::{
    errors::SalonError,
    models::service::{CreateServiceRequest, Service, ServiceResponse, UpdateServiceRequest},
};
use salon_db::models::DbService;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Maps a failed service write, reporting a taken name as a conflict.
pub fn service_write_error(name: &str, err: eyre::Report) -> SalonError {
    if salon_db::is_unique_violation(&err) {
        SalonError::Conflict(format!("A service named {:?} already exists", name.trim()))
    } else {
        SalonError::Database(err)
    }
}

fn into_responses(rows: Vec<DbService>) -> Vec<ServiceResponse> {
    rows.into_iter()
        .map(|row| ServiceResponse::from(Service::from(row)))
        .collect()
}

/// Lists the active services in catalog order
#[axum::debug_handler]
pub async fn list_active_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let rows = salon_db::repositories::service::list_active_services(&state.db_pool)
        .await
        .map_err(SalonError::Database)?;

    Ok(Json(into_responses(rows)))
}

/// Lists every service, inactive ones included
#[axum::debug_handler]
pub async fn list_all_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let rows = salon_db::repositories::service::list_all_services(&state.db_pool)
        .await
        .map_err(SalonError::Database)?;

    Ok(Json(into_responses(rows)))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), AppError> {
    payload.validate()?;

    let row = salon_db::repositories::service::create_service(&state.db_pool, &payload)
        .await
        .map_err(|e| service_write_error(&payload.name, e))?;

    let service = Service::from(row);
    if service.duration_minutes().is_zero() {
        tracing::warn!(
            "Service {:?} was saved with duration {:?}, which blocks no time when booked",
            service.name,
            service.duration
        );
    }
    tracing::info!("Created service {} ({})", service.name, service.id);

    Ok((StatusCode::CREATED, Json(ServiceResponse::from(service))))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceResponse>, AppError> {
    payload.validate()?;

    let row = salon_db::repositories::service::update_service(&state.db_pool, id, &payload)
        .await
        .map_err(|e| service_write_error(payload.name.as_deref().unwrap_or_default(), e))?
        .ok_or_else(|| SalonError::NotFound(format!("Service with ID {} not found", id)))?;

    tracing::info!("Updated service {} ({})", row.name, row.id);

    Ok(Json(ServiceResponse::from(Service::from(row))))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = salon_db::repositories::service::delete_service(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?;

    if !deleted {
        return Err(AppError(SalonError::NotFound(format!(
            "Service with ID {} not found",
            id
        ))));
    }

    tracing::info!("Deleted service {}", id);
    Ok(StatusCode::NO_CONTENT)
}
