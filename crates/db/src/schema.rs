use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Whole lists stored under a single key, versioned for compare-and-set writes
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS record_store (
            key VARCHAR(255) PRIMARY KEY,
            value JSONB NOT NULL DEFAULT '[]'::jsonb,
            version BIGINT NOT NULL DEFAULT 1,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_version CHECK (version > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create telegram_subscribers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS telegram_subscribers (
            user_id BIGINT PRIMARY KEY,
            chat_id BIGINT NOT NULL,
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL DEFAULT '',
            username VARCHAR(255) NOT NULL DEFAULT '',
            subscribed_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_telegram_subscribers_subscribed_at
            ON telegram_subscribers(subscribed_at);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
