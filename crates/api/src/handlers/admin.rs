use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{ApiState, middleware::{auth, error_handling::AppError}};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyAdminKeyRequest {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyAdminKeyResponse {
    pub valid: bool,
}

/// Lets the admin panel check a key before storing it client-side
#[axum::debug_handler]
pub async fn verify_admin_key(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<VerifyAdminKeyRequest>,
) -> Result<Json<VerifyAdminKeyResponse>, AppError> {
    let valid = auth::check_admin_key(&state, &payload.key)?;

    Ok(Json(VerifyAdminKeyResponse { valid }))
}
