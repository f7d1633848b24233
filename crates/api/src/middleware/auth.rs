//! # Authentication Module
//!
//! This module guards the admin surface of the salon API. Admin requests carry
//! a shared key in the `x-admin-key` header; the server only ever stores an
//! Argon2 hash of that key (`ADMIN_KEY_HASH`) and verifies each request
//! against it.

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use eyre::{Result, eyre};
use salon_core::errors::SalonError;

use crate::{ApiState, middleware::error_handling::AppError};

/// Header carrying the admin key.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Hashes a password or admin key using the Argon2 algorithm
///
/// The result is a PHC string (algorithm, version, parameters, salt and hash)
/// suitable for `ADMIN_KEY_HASH`.
///
/// # Example
///
/// ```rust
/// let hashed = salon_api::middleware::auth::hash_password("admin-key").unwrap();
/// assert!(hashed.starts_with("$argon2"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `key` against a stored PHC hash.
///
/// Returns an error only when the stored hash itself is malformed.
pub fn verify_key(stored_hash: &str, key: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(stored_hash).map_err(|e| eyre!("Invalid admin key hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(key.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Verifies `key` against the configured admin hash.
///
/// # Errors
///
/// * `SalonError::Authorization` - No admin hash is configured
/// * `SalonError::Internal` - The configured hash cannot be parsed
pub fn check_admin_key(state: &ApiState, key: &str) -> Result<bool, SalonError> {
    let Some(hash) = state.admin_key_hash.as_deref() else {
        return Err(SalonError::Authorization(
            "Admin access is not configured".to_string(),
        ));
    };

    verify_key(hash, key).map_err(|e| SalonError::Internal(e.into()))
}

/// Middleware rejecting requests without a valid admin key.
pub async fn require_admin(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let Some(key) = key else {
        return Err(AppError(SalonError::Authentication(
            "Missing admin key".to_string(),
        )));
    };

    if !check_admin_key(&state, &key)? {
        tracing::warn!("Rejected admin request to {}", request.uri().path());
        return Err(AppError(SalonError::Authentication(
            "Invalid admin key".to_string(),
        )));
    }

    Ok(next.run(request).await)
}
