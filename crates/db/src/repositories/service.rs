use crate::models::{DbService, DbServiceDuration};
use chrono::Utc;
use eyre::Result;
use salon_core::models::service::{CreateServiceRequest, UpdateServiceRequest};
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

const SERVICE_COLUMNS: &str =
    "id, name, price, duration, category, is_combo, is_active, display_order, created_at";

pub async fn create_service(
    pool: &Pool<Postgres>,
    request: &CreateServiceRequest,
) -> Result<DbService> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating service: id={}, name={}", id, request.name);

    let service = sqlx::query_as::<_, DbService>(&format!(
        r#"
        INSERT INTO services (id, name, price, duration, category, is_combo, is_active, display_order, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {SERVICE_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(request.name.trim())
    .bind(request.price)
    .bind(&request.duration)
    .bind(&request.category)
    .bind(request.is_combo)
    .bind(request.is_active)
    .bind(request.display_order)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<DbService>>
where
    E: PgExecutor<'e>,
{
    let service = sqlx::query_as::<_, DbService>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(service)
}

pub async fn get_active_service_by_name(
    pool: &Pool<Postgres>,
    name: &str,
) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE name = $1 AND is_active = TRUE"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

/// Services shown to clients, in catalog order.
pub async fn list_active_services(pool: &Pool<Postgres>) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(&format!(
        r#"
        SELECT {SERVICE_COLUMNS}
        FROM services
        WHERE is_active = TRUE
        ORDER BY display_order ASC, name ASC
        "#
    ))
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn list_all_services(pool: &Pool<Postgres>) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services ORDER BY display_order ASC, name ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(services)
}

/// Name to duration text for every service, inactive ones included, since
/// existing bookings may reference a service that has since been hidden.
pub async fn get_service_durations<'e, E>(executor: E) -> Result<Vec<DbServiceDuration>>
where
    E: PgExecutor<'e>,
{
    let durations = sqlx::query_as::<_, DbServiceDuration>("SELECT name, duration FROM services")
        .fetch_all(executor)
        .await?;

    Ok(durations)
}

/// Applies the fields present in `request`; returns `None` if no row matched.
///
/// Appointments reference services by name, so a rename is carried over to
/// them in the same transaction.
pub async fn update_service(
    pool: &Pool<Postgres>,
    id: Uuid,
    request: &UpdateServiceRequest,
) -> Result<Option<DbService>> {
    tracing::debug!("Updating service: id={}", id);

    let mut tx = pool.begin().await?;

    let Some(current) = get_service_by_id(&mut *tx, id).await? else {
        return Ok(None);
    };

    let service = sqlx::query_as::<_, DbService>(&format!(
        r#"
        UPDATE services
        SET name = COALESCE($2, name),
            price = COALESCE($3, price),
            duration = COALESCE($4, duration),
            category = COALESCE($5, category),
            is_combo = COALESCE($6, is_combo),
            is_active = COALESCE($7, is_active),
            display_order = COALESCE($8, display_order)
        WHERE id = $1
        RETURNING {SERVICE_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(request.name.as_deref().map(str::trim))
    .bind(request.price)
    .bind(request.duration.as_deref())
    .bind(request.category.as_deref())
    .bind(request.is_combo)
    .bind(request.is_active)
    .bind(request.display_order)
    .fetch_one(&mut *tx)
    .await?;

    if service.name != current.name {
        let renamed = sqlx::query("UPDATE appointments SET service = $2 WHERE service = $1")
            .bind(&current.name)
            .bind(&service.name)
            .execute(&mut *tx)
            .await?;

        tracing::debug!(
            "Renamed service {:?} to {:?} on {} appointments",
            current.name,
            service.name,
            renamed.rows_affected()
        );
    }

    tx.commit().await?;

    Ok(Some(service))
}

/// Returns `true` if a row was deleted.
pub async fn delete_service(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
