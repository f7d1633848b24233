use crate::models::DbAnnouncement;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_announcement(
    pool: &Pool<Postgres>,
    title: &str,
    message: &str,
    is_active: bool,
) -> Result<DbAnnouncement> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let announcement = sqlx::query_as::<_, DbAnnouncement>(
        r#"
        INSERT INTO announcements (id, title, message, is_active, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, title, message, is_active, created_at
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(message)
    .bind(is_active)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(announcement)
}

pub async fn list_active_announcements(pool: &Pool<Postgres>) -> Result<Vec<DbAnnouncement>> {
    let announcements = sqlx::query_as::<_, DbAnnouncement>(
        r#"
        SELECT id, title, message, is_active, created_at
        FROM announcements
        WHERE is_active = TRUE
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(announcements)
}

pub async fn list_announcements(pool: &Pool<Postgres>) -> Result<Vec<DbAnnouncement>> {
    let announcements = sqlx::query_as::<_, DbAnnouncement>(
        r#"
        SELECT id, title, message, is_active, created_at
        FROM announcements
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(announcements)
}

pub async fn update_announcement(
    pool: &Pool<Postgres>,
    id: Uuid,
    title: Option<&str>,
    message: Option<&str>,
    is_active: Option<bool>,
) -> Result<Option<DbAnnouncement>> {
    let announcement = sqlx::query_as::<_, DbAnnouncement>(
        r#"
        UPDATE announcements
        SET title = COALESCE($2, title),
            message = COALESCE($3, message),
            is_active = COALESCE($4, is_active)
        WHERE id = $1
        RETURNING id, title, message, is_active, created_at
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(message)
    .bind(is_active)
    .fetch_optional(pool)
    .await?;

    Ok(announcement)
}

/// Returns `true` if a row was deleted.
pub async fn delete_announcement(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
