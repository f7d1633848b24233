use axum::http::StatusCode;
use rstest::rstest;
use salon_api::{
    handlers::service::service_write_error,
    middleware::{
        auth,
        error_handling::{INTERNAL_ERROR_MESSAGE, map_error},
    },
};
use salon_core::errors::SalonError;

use crate::test_utils::{ADMIN_KEY, admin_state, build_state};

#[rstest]
#[case(SalonError::NotFound("Service not found".to_string()), StatusCode::NOT_FOUND)]
#[case(SalonError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(SalonError::Conflict("Slot taken".to_string()), StatusCode::CONFLICT)]
#[case(SalonError::Authentication("Invalid admin key".to_string()), StatusCode::UNAUTHORIZED)]
#[case(SalonError::Authorization("Not configured".to_string()), StatusCode::FORBIDDEN)]
#[case(SalonError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    SalonError::Internal(Box::new(std::io::Error::other("Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: SalonError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

async fn error_body(error: SalonError) -> serde_json::Value {
    let response = map_error(error);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_server_errors_hide_detail() {
    let body = error_body(SalonError::Database(eyre::eyre!(
        "duplicate key value violates unique constraint \"services_name_key\""
    )))
    .await;

    assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    assert!(!body.to_string().contains("services_name_key"));
}

#[tokio::test]
async fn test_client_errors_keep_message() {
    let body = error_body(SalonError::Conflict("11:00 on 2026-10-20 is no longer available".to_string())).await;

    assert_eq!(body["error"], "Conflict: 11:00 on 2026-10-20 is no longer available");
}

#[test]
fn test_service_write_error_passes_other_failures_through() {
    let error = service_write_error("Henna", eyre::eyre!("connection reset"));

    assert!(matches!(error, SalonError::Database(_)));
}

#[test]
fn test_password_hashing_and_verification() {
    let hashed = auth::hash_password(ADMIN_KEY).unwrap();

    assert!(hashed.starts_with("$argon2"));
    assert!(auth::verify_key(&hashed, ADMIN_KEY).unwrap());
    assert!(!auth::verify_key(&hashed, "wrong-key").unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let first = auth::hash_password(ADMIN_KEY).unwrap();
    let second = auth::hash_password(ADMIN_KEY).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_verify_key_rejects_malformed_hash() {
    assert!(auth::verify_key("not-a-phc-string", ADMIN_KEY).is_err());
}

#[tokio::test]
async fn test_check_admin_key() {
    let state = admin_state();
    assert!(auth::check_admin_key(&state, ADMIN_KEY).unwrap());
    assert!(!auth::check_admin_key(&state, "guess").unwrap());

    let unconfigured = build_state(None);
    assert!(matches!(
        auth::check_admin_key(&unconfigured, ADMIN_KEY),
        Err(SalonError::Authorization(_))
    ));

    let broken = build_state(Some("garbage".to_string()));
    assert!(matches!(
        auth::check_admin_key(&broken, ADMIN_KEY),
        Err(SalonError::Internal(_))
    ));
}
