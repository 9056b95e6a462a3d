use async_trait::async_trait;
use eyre::{Result, WrapErr};
use sqlx::{Pool, Postgres};
use workshop_core::models::subscriber::Subscriber;
use workshop_core::store::SubscriberStore;

use crate::models::DbSubscriber;

#[derive(Debug, Clone)]
pub struct PgSubscriberStore {
    pool: Pool<Postgres>,
}

impl PgSubscriberStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberStore for PgSubscriberStore {
    async fn upsert(&self, subscriber: Subscriber) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO telegram_subscribers (user_id, chat_id, first_name, last_name, username, subscribed_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id)
            DO UPDATE SET chat_id = $2, first_name = $3, last_name = $4, username = $5, subscribed_at = $6
            "#,
        )
        .bind(subscriber.id)
        .bind(subscriber.chat_id)
        .bind(&subscriber.first_name)
        .bind(&subscriber.last_name)
        .bind(&subscriber.username)
        .bind(subscriber.subscribed_at)
        .execute(&self.pool)
        .await
        .wrap_err_with(|| format!("Failed to store subscriber {}", subscriber.id))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Subscriber>> {
        let rows = sqlx::query_as::<_, DbSubscriber>(
            r#"
            SELECT user_id, chat_id, first_name, last_name, username, subscribed_at
            FROM telegram_subscribers
            ORDER BY subscribed_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .wrap_err("Failed to list subscribers")?;

        Ok(rows.into_iter().map(Subscriber::from).collect())
    }
}
