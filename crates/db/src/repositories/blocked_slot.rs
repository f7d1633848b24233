use crate::models::DbBlockedSlot;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

pub async fn create_blocked_slot(
    pool: &Pool<Postgres>,
    blocked_date: NaiveDate,
    blocked_time: &str,
    reason: Option<&str>,
) -> Result<DbBlockedSlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Blocking slot: id={}, date={}, time={}", id, blocked_date, blocked_time);

    let slot = sqlx::query_as::<_, DbBlockedSlot>(
        r#"
        INSERT INTO blocked_slots (id, blocked_date, blocked_time, reason, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, blocked_date, blocked_time, reason, created_at
        "#,
    )
    .bind(id)
    .bind(blocked_date)
    .bind(blocked_time)
    .bind(reason)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(slot)
}

pub async fn get_blocked_slots_by_date<'e, E>(
    executor: E,
    blocked_date: NaiveDate,
) -> Result<Vec<DbBlockedSlot>>
where
    E: PgExecutor<'e>,
{
    let slots = sqlx::query_as::<_, DbBlockedSlot>(
        r#"
        SELECT id, blocked_date, blocked_time, reason, created_at
        FROM blocked_slots
        WHERE blocked_date = $1
        ORDER BY blocked_time ASC
        "#,
    )
    .bind(blocked_date)
    .fetch_all(executor)
    .await?;

    Ok(slots)
}

pub async fn list_blocked_slots(pool: &Pool<Postgres>) -> Result<Vec<DbBlockedSlot>> {
    let slots = sqlx::query_as::<_, DbBlockedSlot>(
        r#"
        SELECT id, blocked_date, blocked_time, reason, created_at
        FROM blocked_slots
        ORDER BY blocked_date ASC, blocked_time ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

/// Returns `true` if a row was deleted.
pub async fn delete_blocked_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM blocked_slots WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
