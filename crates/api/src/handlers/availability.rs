//! # Availability Handlers
//!
//! Serves the start times a client may still book on a given date.
//!
//! The handler performs the three store reads the resolver needs (confirmed
//! appointments on the date, blocked slots on the date, and every service's
//! duration text), converts the rows into resolver inputs, and runs
//! [`resolve_availability`] with the salon's current local time. Resolver
//! warnings are logged and never reach the client.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::{collections::HashMap, sync::Arc};
use salon_core::{
    availability::{
        AvailabilityRequest, AvailabilityResult, AvailabilityWarning, BlockedSlot,
        BookedAppointment, BusinessHours, TimeOfDay, resolve_availability,
    },
    errors::SalonError,
    models::appointment::AvailabilityResponse,
};
use salon_db::models::{DbAppointment, DbBlockedSlot, DbServiceDuration};
use sqlx::PgConnection;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Target date as `YYYY-MM-DD`
    pub date: String,
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, SalonError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| SalonError::Validation(format!("Invalid date: {:?} (expected YYYY-MM-DD)", raw)))
}

/// Converts store rows into a resolver request for `date`.
///
/// Rows whose stored time is not a valid `HH:MM` value are skipped with a
/// warning; they cannot be matched against the catalog anyway.
pub fn build_request(
    date: NaiveDate,
    hours: &BusinessHours,
    appointments: Vec<DbAppointment>,
    blocked: Vec<DbBlockedSlot>,
    durations: Vec<DbServiceDuration>,
) -> AvailabilityRequest {
    let appointments = appointments
        .into_iter()
        .filter_map(|row| match row.appointment_time.parse::<TimeOfDay>() {
            Ok(start) => Some(BookedAppointment {
                service: row.service,
                start,
            }),
            Err(e) => {
                tracing::warn!("Skipping appointment {}: {}", row.id, e);
                None
            }
        })
        .collect();

    let blocked = blocked
        .into_iter()
        .filter_map(|row| match row.blocked_time.parse::<TimeOfDay>() {
            Ok(time) => Some(BlockedSlot {
                date: row.blocked_date,
                time,
                reason: row.reason,
            }),
            Err(e) => {
                tracing::warn!("Skipping blocked slot {}: {}", row.id, e);
                None
            }
        })
        .collect();

    let durations: HashMap<String, String> = durations
        .into_iter()
        .map(|row| (row.name, row.duration))
        .collect();

    AvailabilityRequest {
        date,
        catalog: hours.catalog_for(date).to_vec(),
        appointments,
        blocked,
        durations,
        step_minutes: hours.step_minutes,
    }
}

/// Logs resolver diagnostics for `date`.
pub fn log_warnings(date: NaiveDate, warnings: &[AvailabilityWarning]) {
    for warning in warnings {
        match warning {
            AvailabilityWarning::UnknownService { service, start } => tracing::warn!(
                "Appointment on {} at {} references unknown service {:?}; it blocks no slots",
                date,
                start,
                service
            ),
            AvailabilityWarning::ZeroDuration { service, duration } => tracing::warn!(
                "Service {:?} has duration {:?} which parses to zero minutes; it blocks no slots",
                service,
                duration
            ),
        }
    }
}

/// Loads the inputs for `date` over `conn` and resolves availability.
///
/// Callers that go on to write a booking pass a transaction holding the
/// date's booking lock, so the reads and the write see the same state.
pub async fn load_availability(
    conn: &mut PgConnection,
    hours: &BusinessHours,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Result<AvailabilityResult, AppError> {
    let appointments =
        salon_db::repositories::appointment::get_confirmed_appointments_by_date(&mut *conn, date)
            .await
            .map_err(SalonError::Database)?;

    let blocked = salon_db::repositories::blocked_slot::get_blocked_slots_by_date(&mut *conn, date)
        .await
        .map_err(SalonError::Database)?;

    let durations = salon_db::repositories::service::get_service_durations(&mut *conn)
        .await
        .map_err(SalonError::Database)?;

    let request = build_request(date, hours, appointments, blocked, durations);
    let result = resolve_availability(&request, now);
    log_warnings(date, &result.warnings);

    Ok(result)
}

/// Lists the start times still offered on a date
///
/// # Endpoint
///
/// ```text
/// GET /api/availability?date=2026-10-20
/// ```
///
/// A closed weekday returns `open: false` and no hours without touching the
/// store. An empty `hours` list on an open day is a normal answer.
///
/// # Errors
///
/// * `SalonError::Validation` - Malformed date
/// * `SalonError::Database` - Database error
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = parse_date(&query.date)?;

    if !state.business_hours.is_open(date) {
        return Ok(Json(AvailabilityResponse {
            date,
            open: false,
            hours: Vec::new(),
        }));
    }

    let mut conn = state
        .db_pool
        .acquire()
        .await
        .map_err(|e| SalonError::Database(e.into()))?;
    let result = load_availability(&mut conn, &state.business_hours, date, state.now()).await?;

    Ok(Json(AvailabilityResponse {
        date,
        open: true,
        hours: result.hours.iter().map(ToString::to_string).collect(),
    }))
}
