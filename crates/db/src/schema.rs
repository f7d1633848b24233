use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL UNIQUE,
            price DOUBLE PRECISION NOT NULL DEFAULT 0,
            duration VARCHAR(64) NOT NULL,
            category VARCHAR(64) NOT NULL DEFAULT 'general',
            is_combo BOOLEAN NOT NULL DEFAULT FALSE,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            display_order INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT non_negative_price CHECK (price >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            client_name VARCHAR(100) NOT NULL,
            client_email VARCHAR(255) NOT NULL,
            client_phone VARCHAR(20) NOT NULL,
            service VARCHAR(255) NOT NULL,
            appointment_date DATE NOT NULL,
            appointment_time VARCHAR(5) NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'confirmed',
            observations TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'cancelled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create blocked_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS blocked_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            blocked_date DATE NOT NULL,
            blocked_time VARCHAR(5) NOT NULL,
            reason TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create announcements table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS announcements (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title VARCHAR(255) NOT NULL,
            message TEXT NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_appointments_date_status ON appointments(appointment_date, status)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_client_email ON appointments(client_email)",
        "CREATE INDEX IF NOT EXISTS idx_blocked_slots_date ON blocked_slots(blocked_date)",
        "CREATE INDEX IF NOT EXISTS idx_services_display_order ON services(display_order)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
