use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use salon_core::{
    availability::{AvailabilityResult, BusinessHours, TimeOfDay},
    errors::SalonError,
    models::appointment::{
        Appointment, AppointmentStatus, CreateAppointmentRequest, UpdateAppointmentStatusRequest,
        UpdateAppointmentStatusResponse,
    },
};
use salon_db::{models::DbAppointment, repositories::appointment::NewAppointment};
use uuid::Uuid;

use crate::{
    ApiState,
    handlers::availability::load_availability,
    middleware::error_handling::AppError,
};

#[derive(Debug, Deserialize)]
pub struct ClientAppointmentsQuery {
    pub email: String,
}

/// Checks that `date` can be booked at all: not in the past and on an open day.
pub fn check_bookable_date(
    hours: &BusinessHours,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Result<(), SalonError> {
    if date < now.date() {
        return Err(SalonError::Validation(
            "Cannot book an appointment in the past".to_string(),
        ));
    }
    if !hours.is_open(date) {
        return Err(SalonError::Validation(format!(
            "The salon is closed on {}",
            date.format("%A")
        )));
    }
    Ok(())
}

/// Confirms `time` is still offered in a freshly resolved availability.
pub fn check_slot_available(
    availability: &AvailabilityResult,
    date: NaiveDate,
    time: TimeOfDay,
) -> Result<(), SalonError> {
    if availability.hours.contains(&time) {
        Ok(())
    } else {
        Err(SalonError::Conflict(format!(
            "{} on {} is no longer available",
            time, date
        )))
    }
}

fn database_error(err: sqlx::Error) -> SalonError {
    SalonError::Database(err.into())
}

fn into_appointments(rows: Vec<DbAppointment>) -> Result<Vec<Appointment>, SalonError> {
    rows.into_iter().map(Appointment::try_from).collect()
}

/// Books an appointment for a client
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// ```
///
/// The requested time is checked against the same availability a client sees,
/// resolved at the moment of booking, so a slot taken or blocked since the
/// client loaded the form is refused.
///
/// # Errors
///
/// * `SalonError::Validation` - Bad client fields, malformed time, past date or closed day
/// * `SalonError::NotFound` - Unknown or inactive service
/// * `SalonError::Conflict` - The slot is not available
/// * `SalonError::Database` - Database error
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    payload.validate()?;
    let time: TimeOfDay = payload.time.trim().parse()?;

    let now = state.now();
    check_bookable_date(&state.business_hours, payload.date, now)?;

    let service =
        salon_db::repositories::service::get_active_service_by_name(&state.db_pool, payload.service.trim())
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(|| SalonError::NotFound(format!("Service {:?} not found", payload.service)))?;

    let mut tx = state.db_pool.begin().await.map_err(database_error)?;
    salon_db::repositories::appointment::lock_booking_date(&mut tx, payload.date)
        .await
        .map_err(SalonError::Database)?;

    let availability = load_availability(&mut tx, &state.business_hours, payload.date, now).await?;
    check_slot_available(&availability, payload.date, time)?;

    let time_text = time.to_string();
    let new_appointment = NewAppointment {
        client_name: &payload.client_name,
        client_email: &payload.client_email,
        client_phone: &payload.client_phone,
        service: &service.name,
        appointment_date: payload.date,
        appointment_time: &time_text,
        status: AppointmentStatus::Confirmed,
        observations: payload
            .observations
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty()),
    };

    let created = salon_db::repositories::appointment::create_appointment(&mut *tx, &new_appointment)
        .await
        .map_err(SalonError::Database)?;
    tx.commit().await.map_err(database_error)?;

    tracing::info!(
        "Booked {} on {} at {} (appointment {})",
        created.service,
        created.appointment_date,
        created.appointment_time,
        created.id
    );

    Ok(Json(Appointment::try_from(created)?))
}

/// Lists a client's appointments by email
#[axum::debug_handler]
pub async fn list_client_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ClientAppointmentsQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    if query.email.trim().is_empty() {
        return Err(AppError(SalonError::Validation(
            "An email address is required".to_string(),
        )));
    }

    let rows = salon_db::repositories::appointment::list_appointments_by_email(&state.db_pool, &query.email)
        .await
        .map_err(SalonError::Database)?;

    Ok(Json(into_appointments(rows)?))
}

/// Lists every appointment for the admin panel
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let rows = salon_db::repositories::appointment::list_appointments(&state.db_pool)
        .await
        .map_err(SalonError::Database)?;

    Ok(Json(into_appointments(rows)?))
}

/// Changes an appointment's status; only confirmed appointments hold slots
///
/// Confirming an appointment that does not currently hold its slot re-checks
/// availability for its date under the booking lock, so it cannot overlap a
/// booking or block made in the meantime.
///
/// # Errors
///
/// * `SalonError::NotFound` - No appointment with this id
/// * `SalonError::Conflict` - Its time is no longer available
/// * `SalonError::Database` - Database error
#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> Result<Json<UpdateAppointmentStatusResponse>, AppError> {
    let not_found = || SalonError::NotFound(format!("Appointment with ID {} not found", id));

    let mut tx = state.db_pool.begin().await.map_err(database_error)?;

    let current = salon_db::repositories::appointment::get_appointment_by_id(&mut *tx, id)
        .await
        .map_err(SalonError::Database)?
        .map(Appointment::try_from)
        .transpose()?
        .ok_or_else(not_found)?;

    if payload.status.blocks_slots() && !current.status.blocks_slots() {
        salon_db::repositories::appointment::lock_booking_date(&mut tx, current.appointment_date)
            .await
            .map_err(SalonError::Database)?;

        let time: TimeOfDay = current.appointment_time.parse()?;
        let availability = load_availability(
            &mut tx,
            &state.business_hours,
            current.appointment_date,
            state.now(),
        )
        .await?;
        check_slot_available(&availability, current.appointment_date, time)?;
    }

    let updated =
        salon_db::repositories::appointment::update_appointment_status(&mut *tx, id, payload.status)
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(not_found)?;
    tx.commit().await.map_err(database_error)?;

    tracing::info!("Appointment {} is now {}", updated.id, payload.status);

    Ok(Json(UpdateAppointmentStatusResponse {
        id: updated.id,
        status: payload.status,
        updated_at: Utc::now(),
    }))
}
