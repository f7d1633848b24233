use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{Value, json};

use crate::test_utils::{ADMIN_KEY, admin_state, build_state, database_state, test_server};

fn admin_header(key: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(salon_api::middleware::auth::ADMIN_KEY_HEADER),
        HeaderValue::from_str(key).unwrap(),
    )
}

#[tokio::test]
async fn test_admin_route_requires_key() {
    let server = test_server(admin_state());

    let response = server.get("/api/admin/appointments").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Authentication error: Missing admin key");
}

#[tokio::test]
async fn test_admin_route_rejects_wrong_key() {
    let server = test_server(admin_state());
    let (name, value) = admin_header("not-the-key");

    let response = server
        .delete("/api/admin/blocked-slots/7f9c24e8-3b12-4fef-91e0-3e6f1f9b2a11")
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_refused_without_configured_hash() {
    let server = test_server(build_state(None));
    let (name, value) = admin_header(ADMIN_KEY);

    let response = server
        .get("/api/admin/services")
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_valid_key_reaches_handler_validation() {
    let server = test_server(admin_state());

    let (name, value) = admin_header(ADMIN_KEY);
    let response = server
        .post("/api/admin/blocked-slots")
        .add_header(name, value)
        .json(&json!({ "date": "2026-10-20", "time": "25:00", "reason": null }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let (name, value) = admin_header(ADMIN_KEY);
    let response = server
        .post("/api/admin/services")
        .add_header(name, value)
        .json(&json!({ "name": "Henna", "price": -10.0, "duration": "40min" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let (name, value) = admin_header(ADMIN_KEY);
    let response = server
        .put("/api/admin/announcements/7f9c24e8-3b12-4fef-91e0-3e6f1f9b2a11")
        .add_header(name, value)
        .json(&json!({ "title": "   " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_admin_key() {
    let server = test_server(admin_state());

    let body: Value = server
        .post("/api/admin/verify")
        .json(&json!({ "key": ADMIN_KEY }))
        .await
        .json();
    assert_eq!(body["valid"], true);

    let body: Value = server
        .post("/api/admin/verify")
        .json(&json!({ "key": "nope" }))
        .await
        .json();
    assert_eq!(body["valid"], false);
}

#[tokio::test]
async fn test_verify_admin_key_without_configured_hash() {
    let server = test_server(build_state(None));

    let response = server
        .post("/api/admin/verify")
        .json(&json!({ "key": ADMIN_KEY }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_duplicate_service_name_is_a_conflict() {
    let server = test_server(database_state().await);
    let name = format!("Design {}", uuid::Uuid::new_v4());
    let service = json!({ "name": name, "price": 60.0, "duration": "1h" });

    let (key, value) = admin_header(ADMIN_KEY);
    let created = server
        .post("/api/admin/services")
        .add_header(key, value)
        .json(&service)
        .await;
    created.assert_status(StatusCode::CREATED);

    let (key, value) = admin_header(ADMIN_KEY);
    let duplicate = server
        .post("/api/admin/services")
        .add_header(key, value)
        .json(&service)
        .await;
    duplicate.assert_status(StatusCode::CONFLICT);
    let body: Value = duplicate.json();
    assert!(body["error"].as_str().unwrap().contains("already exists"));

    let (key, value) = admin_header(ADMIN_KEY);
    let other: Value = server
        .post("/api/admin/services")
        .add_header(key, value)
        .json(&json!({ "name": format!("{} B", name), "price": 60.0, "duration": "1h" }))
        .await
        .json();

    let (key, value) = admin_header(ADMIN_KEY);
    let renamed = server
        .put(&format!("/api/admin/services/{}", other["id"].as_str().unwrap()))
        .add_header(key, value)
        .json(&json!({ "name": name }))
        .await;
    renamed.assert_status(StatusCode::CONFLICT);
}
