use crate::models::DbAppointment;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use salon_core::models::appointment::AppointmentStatus;
use sqlx::{PgConnection, PgExecutor, Pool, Postgres};
use uuid::Uuid;

const APPOINTMENT_COLUMNS: &str = "id, client_name, client_email, client_phone, service, \
     appointment_date, appointment_time, status, observations, created_at";

pub struct NewAppointment<'a> {
    pub client_name: &'a str,
    pub client_email: &'a str,
    pub client_phone: &'a str,
    pub service: &'a str,
    pub appointment_date: NaiveDate,
    pub appointment_time: &'a str,
    pub status: AppointmentStatus,
    pub observations: Option<&'a str>,
}

/// Serializes bookings for `date` until the surrounding transaction ends.
///
/// Every path that checks a date's availability and then writes a confirmed
/// appointment takes this lock first, inside the same transaction.
pub async fn lock_booking_date(conn: &mut PgConnection, date: NaiveDate) -> Result<()> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::text))")
        .bind(date.to_string())
        .execute(conn)
        .await?;

    Ok(())
}

pub async fn create_appointment<'e, E>(
    executor: E,
    appointment: &NewAppointment<'_>,
) -> Result<DbAppointment>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating appointment: id={}, service={}, date={}, time={}",
        id,
        appointment.service,
        appointment.appointment_date,
        appointment.appointment_time
    );

    let created = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments
            (id, client_name, client_email, client_phone, service,
             appointment_date, appointment_time, status, observations, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(appointment.client_name.trim())
    .bind(appointment.client_email.trim())
    .bind(appointment.client_phone.trim())
    .bind(appointment.service)
    .bind(appointment.appointment_date)
    .bind(appointment.appointment_time)
    .bind(appointment.status.as_str())
    .bind(appointment.observations)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(created)
}

/// Confirmed appointments on `date`; the ones that occupy slots.
pub async fn get_confirmed_appointments_by_date<'e, E>(
    executor: E,
    date: NaiveDate,
) -> Result<Vec<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let appointments = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE appointment_date = $1 AND status = $2
        ORDER BY appointment_time ASC
        "#
    ))
    .bind(date)
    .bind(AppointmentStatus::Confirmed.as_str())
    .fetch_all(executor)
    .await?;

    tracing::debug!("Found {} confirmed appointments on {}", appointments.len(), date);
    Ok(appointments)
}

pub async fn list_appointments(pool: &Pool<Postgres>) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        ORDER BY appointment_date ASC, appointment_time ASC
        "#
    ))
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn list_appointments_by_email(
    pool: &Pool<Postgres>,
    client_email: &str,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE LOWER(client_email) = LOWER($1)
        ORDER BY appointment_date ASC, appointment_time ASC
        "#
    ))
    .bind(client_email.trim())
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn get_appointment_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(appointment)
}

/// Returns `None` if no appointment has this id.
pub async fn update_appointment_status<'e, E>(
    executor: E,
    id: Uuid,
    status: AppointmentStatus,
) -> Result<Option<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    tracing::debug!("Updating appointment status: id={}, status={}", id, status);

    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET status = $2
        WHERE id = $1
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(executor)
    .await?;

    Ok(appointment)
}
