use axum::http::StatusCode;
use chrono::{NaiveDate, NaiveDateTime, Utc, Weekday};
use pretty_assertions::assert_eq;
use salon_api::handlers::availability::{build_request, parse_date};
use salon_core::availability::{
    AvailabilityWarning, BusinessHours, TimeOfDay, resolve_availability,
};
use salon_db::models::{DbAppointment, DbBlockedSlot, DbServiceDuration};
use serde_json::Value;
use uuid::Uuid;

use crate::test_utils::{TestContext, build_state, test_server, upcoming};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn day_before(day: NaiveDate) -> NaiveDateTime {
    day.pred_opt().unwrap().and_hms_opt(12, 0, 0).unwrap()
}

fn appointment_row(day: NaiveDate, service: &str, time: &str) -> DbAppointment {
    DbAppointment {
        id: Uuid::new_v4(),
        client_name: "Ana Lima".to_string(),
        client_email: "ana@example.com".to_string(),
        client_phone: "11987654321".to_string(),
        service: service.to_string(),
        appointment_date: day,
        appointment_time: time.to_string(),
        status: "confirmed".to_string(),
        observations: None,
        created_at: Utc::now(),
    }
}

fn blocked_row(day: NaiveDate, time: &str) -> DbBlockedSlot {
    DbBlockedSlot {
        id: Uuid::new_v4(),
        blocked_date: day,
        blocked_time: time.to_string(),
        reason: Some("Curso".to_string()),
        created_at: Utc::now(),
    }
}

fn duration_row(name: &str, duration: &str) -> DbServiceDuration {
    DbServiceDuration {
        name: name.to_string(),
        duration: duration.to_string(),
    }
}

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

#[test]
fn test_parse_date() {
    assert_eq!(parse_date("2026-10-20").unwrap(), date(2026, 10, 20));
    assert!(parse_date("20/10/2026").is_err());
    assert!(parse_date("2026-02-30").is_err());
    assert!(parse_date("").is_err());
}

#[tokio::test]
async fn test_resolve_from_repository_rows() {
    let day = date(2026, 10, 20);
    let mut ctx = TestContext::new();

    ctx.appointment_repo
        .expect_get_confirmed_appointments_by_date()
        .returning(move |d| {
            Ok(vec![
                appointment_row(d, "Design com Henna", "09:30"),
                appointment_row(d, "Micropigmentação", "14:00"),
            ])
        });
    ctx.blocked_slot_repo
        .expect_get_blocked_slots_by_date()
        .returning(move |d| Ok(vec![blocked_row(d, "17:30")]));
    ctx.service_repo
        .expect_get_service_durations()
        .returning(|| {
            Ok(vec![
                duration_row("Design com Henna", "1h"),
                duration_row("Micropigmentação", "2h"),
            ])
        });

    let appointments = ctx
        .appointment_repo
        .get_confirmed_appointments_by_date(day)
        .await
        .unwrap();
    let blocked = ctx
        .blocked_slot_repo
        .get_blocked_slots_by_date(day)
        .await
        .unwrap();
    let durations = ctx.service_repo.get_service_durations().await.unwrap();

    let request = build_request(day, &BusinessHours::default(), appointments, blocked, durations);
    let result = resolve_availability(&request, day_before(day));

    let hours: Vec<String> = result.hours.iter().map(ToString::to_string).collect();
    assert_eq!(
        hours,
        vec![
            "10:30", "11:00", "11:30", "13:30", "16:00", "16:30", "17:00", "18:00"
        ]
    );
    assert!(result.warnings.is_empty());
}

#[test]
fn test_build_request_skips_malformed_times() {
    let day = date(2026, 10, 20);

    let request = build_request(
        day,
        &BusinessHours::default(),
        vec![
            appointment_row(day, "Henna", "10h"),
            appointment_row(day, "Henna", "10:00"),
        ],
        vec![blocked_row(day, "whenever")],
        vec![duration_row("Henna", "40min")],
    );

    assert_eq!(request.appointments.len(), 1);
    assert_eq!(request.appointments[0].start, t("10:00"));
    assert!(request.blocked.is_empty());
    assert_eq!(request.catalog.len(), 15);
    assert_eq!(request.step_minutes, 30);
}

#[test]
fn test_build_request_closed_day_has_empty_catalog() {
    let monday = date(2026, 10, 19);

    let request = build_request(monday, &BusinessHours::default(), vec![], vec![], vec![]);

    assert!(request.catalog.is_empty());
    assert!(resolve_availability(&request, day_before(monday)).hours.is_empty());
}

#[test]
fn test_unknown_service_row_is_reported() {
    let day = date(2026, 10, 20);

    let request = build_request(
        day,
        &BusinessHours::default(),
        vec![appointment_row(day, "Removed Service", "09:30")],
        vec![],
        vec![duration_row("Henna", "40min")],
    );
    let result = resolve_availability(&request, day_before(day));

    assert_eq!(result.hours.len(), 15);
    assert_eq!(
        result.warnings,
        vec![AvailabilityWarning::UnknownService {
            service: "Removed Service".to_string(),
            start: t("09:30"),
        }]
    );
}

#[tokio::test]
async fn test_availability_endpoint_rejects_bad_date() {
    let server = test_server(build_state(None));

    let response = server
        .get("/api/availability")
        .add_query_param("date", "next tuesday")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_availability_endpoint_closed_day() {
    let server = test_server(build_state(None));
    let monday = upcoming(Weekday::Mon);

    let response = server
        .get("/api/availability")
        .add_query_param("date", monday.format("%Y-%m-%d").to_string())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["open"], false);
    assert_eq!(body["hours"], serde_json::json!([]));
}
