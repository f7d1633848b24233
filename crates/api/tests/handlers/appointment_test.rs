use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Days, NaiveDate, Utc, Weekday};
use salon_api::{
    handlers::appointment::{
        check_bookable_date, check_slot_available, create_appointment, update_appointment_status,
    },
    middleware::error_handling::AppError,
};
use salon_core::{
    availability::{AvailabilityResult, BusinessHours, TimeOfDay},
    errors::SalonError,
    models::appointment::{
        AppointmentStatus, CreateAppointmentRequest, UpdateAppointmentStatusRequest,
    },
};
use serde_json::{Value, json};

use crate::test_utils::{
    build_state, clear_day, create_test_service, database_state, test_server, upcoming,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn booking(day: NaiveDate) -> Value {
    json!({
        "client_name": "Maria Souza",
        "client_email": "maria@example.com",
        "client_phone": "11987654321",
        "service": "Design de Sobrancelhas",
        "date": day.format("%Y-%m-%d").to_string(),
        "time": "10:00",
        "observations": null
    })
}

#[test]
fn test_check_bookable_date() {
    let hours = BusinessHours::default();
    let now = date(2026, 10, 20).and_hms_opt(15, 0, 0).unwrap();

    // Today is bookable; the slot check handles the clock.
    assert!(check_bookable_date(&hours, date(2026, 10, 20), now).is_ok());
    assert!(check_bookable_date(&hours, date(2026, 10, 24), now).is_ok());

    match check_bookable_date(&hours, date(2026, 10, 17), now) {
        Err(SalonError::Validation(message)) => {
            assert_eq!(message, "Cannot book an appointment in the past")
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    match check_bookable_date(&hours, date(2026, 10, 26), now) {
        Err(SalonError::Validation(message)) => {
            assert_eq!(message, "The salon is closed on Monday")
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_check_slot_available() {
    let availability = AvailabilityResult {
        hours: vec![t("10:00"), t("10:30")],
        warnings: vec![],
    };
    let day = date(2026, 10, 20);

    assert!(check_slot_available(&availability, day, t("10:30")).is_ok());

    match check_slot_available(&availability, day, t("11:00")) {
        Err(SalonError::Conflict(message)) => {
            assert_eq!(message, "11:00 on 2026-10-20 is no longer available")
        }
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_appointment_rejects_invalid_client_data() {
    let server = test_server(build_state(None));
    let mut body = booking(upcoming(Weekday::Tue));
    body["client_name"] = json!("M");

    let response = server.post("/api/appointments").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(
        error["error"],
        "Validation error: Name must be at least 2 characters"
    );
}

#[tokio::test]
async fn test_create_appointment_rejects_malformed_time() {
    let server = test_server(build_state(None));
    let mut body = booking(upcoming(Weekday::Tue));
    body["time"] = json!("10h");

    let response = server.post("/api/appointments").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_appointment_rejects_closed_day() {
    let server = test_server(build_state(None));

    let response = server
        .post("/api/appointments")
        .json(&booking(upcoming(Weekday::Sun)))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["error"], "Validation error: The salon is closed on Sunday");
}

#[tokio::test]
async fn test_create_appointment_rejects_past_date() {
    let server = test_server(build_state(None));
    let past = Utc::now().date_naive() - Days::new(30);

    let response = server.post("/api/appointments").json(&booking(past)).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_client_appointments_require_email() {
    let server = test_server(build_state(None));

    let response = server
        .get("/api/appointments")
        .add_query_param("email", "  ")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

fn booking_request(day: NaiveDate, service: &str, email: &str) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        client_name: "Maria Souza".to_string(),
        client_email: email.to_string(),
        client_phone: "11987654321".to_string(),
        service: service.to_string(),
        date: day,
        time: "10:00".to_string(),
        observations: None,
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_concurrent_bookings_take_one_slot_once() {
    let state = database_state().await;
    let service = create_test_service(&state.db_pool, "1h").await;
    let day = upcoming(Weekday::Tue);
    clear_day(&state.db_pool, day).await;

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let state = state.clone();
            let request = booking_request(day, &service, &format!("client{}@example.com", i));
            tokio::spawn(async move { create_appointment(State(state), Json(request)).await })
        })
        .collect();

    let mut accepted = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(AppError(SalonError::Conflict(_))) => conflicts += 1,
            Err(other) => panic!("unexpected booking failure: {:?}", other),
        }
    }
    assert_eq!(accepted, 1);
    assert_eq!(conflicts, 5);

    let stored =
        salon_db::repositories::appointment::get_confirmed_appointments_by_date(&state.db_pool, day)
            .await
            .unwrap();
    assert_eq!(
        stored.iter().filter(|a| a.appointment_time == "10:00").count(),
        1
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_reconfirming_a_taken_slot_is_a_conflict() {
    let state = database_state().await;
    let service = create_test_service(&state.db_pool, "1h").await;
    let day = upcoming(Weekday::Wed);
    clear_day(&state.db_pool, day).await;

    let set_status = |id, status| {
        update_appointment_status(
            State(state.clone()),
            Path(id),
            Json(UpdateAppointmentStatusRequest { status }),
        )
    };

    let Json(first) = create_appointment(
        State(state.clone()),
        Json(booking_request(day, &service, "first@example.com")),
    )
    .await
    .unwrap();
    set_status(first.id, AppointmentStatus::Cancelled).await.unwrap();

    let Json(second) = create_appointment(
        State(state.clone()),
        Json(booking_request(day, &service, "second@example.com")),
    )
    .await
    .unwrap();

    let result = set_status(first.id, AppointmentStatus::Confirmed).await;
    assert!(matches!(result, Err(AppError(SalonError::Conflict(_)))));

    // Pending never holds a slot, so no check applies.
    set_status(first.id, AppointmentStatus::Pending).await.unwrap();

    set_status(second.id, AppointmentStatus::Cancelled).await.unwrap();
    let Json(confirmed) = set_status(first.id, AppointmentStatus::Confirmed).await.unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);
}
