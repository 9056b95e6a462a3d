use async_trait::async_trait;
use eyre::{Result, WrapErr};
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use workshop_core::models::booking::Booking;
use workshop_core::store::{BookingSnapshot, BookingStore, WriteOutcome};

use crate::models::DbBookingRecord;

/// Key the booking list is stored under unless configured otherwise.
pub const DEFAULT_BOOKINGS_KEY: &str = "clay_workshop_bookings";

/// Booking list kept as one JSONB row of `record_store`.
///
/// Writes are compare-and-set on the row's `version` column.
#[derive(Debug, Clone)]
pub struct PgBookingStore {
    pool: Pool<Postgres>,
    key: String,
}

impl PgBookingStore {
    pub fn new(pool: Pool<Postgres>, key: impl Into<String>) -> Self {
        Self {
            pool,
            key: key.into(),
        }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn get(&self) -> Result<BookingSnapshot> {
        let record = sqlx::query_as::<_, DbBookingRecord>(
            r#"
            SELECT key, value, version
            FROM record_store
            WHERE key = $1
            "#,
        )
        .bind(&self.key)
        .fetch_optional(&self.pool)
        .await
        .wrap_err_with(|| format!("Failed to read booking list {}", self.key))?;

        match record {
            Some(record) => Ok(BookingSnapshot {
                bookings: record.value.0,
                version: u64::try_from(record.version)
                    .wrap_err("Stored booking list version is negative")?,
            }),
            None => Ok(BookingSnapshot::default()),
        }
    }

    async fn set(&self, bookings: Vec<Booking>, expected_version: u64) -> Result<WriteOutcome> {
        let count = bookings.len();

        // Version 0 means the caller saw no row; only the first writer may create it
        let written = if expected_version == 0 {
            sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO record_store (key, value, version, updated_at)
                VALUES ($1, $2, 1, NOW())
                ON CONFLICT (key) DO NOTHING
                RETURNING version
                "#,
            )
            .bind(&self.key)
            .bind(Json(bookings))
            .fetch_optional(&self.pool)
            .await
        } else {
            let expected = i64::try_from(expected_version)
                .wrap_err("Booking list version out of range")?;

            sqlx::query_scalar::<_, i64>(
                r#"
                UPDATE record_store
                SET value = $2, version = version + 1, updated_at = NOW()
                WHERE key = $1 AND version = $3
                RETURNING version
                "#,
            )
            .bind(&self.key)
            .bind(Json(bookings))
            .bind(expected)
            .fetch_optional(&self.pool)
            .await
        }
        .wrap_err_with(|| format!("Failed to write booking list {}", self.key))?;

        match written {
            Some(version) => {
                tracing::debug!(key = %self.key, version, count, "Booking list stored");
                Ok(WriteOutcome::Written {
                    version: u64::try_from(version).wrap_err("Stored booking list version is negative")?,
                })
            }
            None => Ok(WriteOutcome::VersionMismatch),
        }
    }
}
