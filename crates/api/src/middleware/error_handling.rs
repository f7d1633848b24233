//! # Error Handling Middleware
//!
//! This module maps domain errors to HTTP status codes and JSON error bodies,
//! so every handler reports failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use salon_core::errors::SalonError;
use serde_json::json;

/// Body message for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `SalonError` and implements `IntoResponse`, producing a
/// body of the form `{ "error": "<message>" }`. Server errors get a generic
/// message.
#[derive(Debug)]
pub struct AppError(pub SalonError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SalonError::NotFound(_) => StatusCode::NOT_FOUND,
            SalonError::Validation(_) => StatusCode::BAD_REQUEST,
            SalonError::Conflict(_) => StatusCode::CONFLICT,
            SalonError::Authentication(_) => StatusCode::UNAUTHORIZED,
            SalonError::Authorization(_) => StatusCode::FORBIDDEN,
            SalonError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SalonError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Server-side detail stays in the logs.
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.0.to_string()
        };
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on `SalonResult` inside handlers returning `Result<_, AppError>`.
impl From<SalonError> for AppError {
    fn from(err: SalonError) -> Self {
        AppError(err)
    }
}

/// Repository errors surface as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SalonError::Database(err))
    }
}

/// Maps a SalonError to an HTTP response
pub fn map_error(err: SalonError) -> Response {
    AppError(err).into_response()
}
