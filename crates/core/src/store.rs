//! # Record Stores
//!
//! Storage seams used by the booking service. The booking list lives under a
//! single logical key and is always read and rewritten whole. Every write
//! carries the version the caller read; a store only applies the write when
//! that version is still current, so concurrent read-modify-write cycles
//! cannot silently overwrite each other.
//!
//! The in-memory implementations here back local runs and tests; the
//! PostgreSQL ones live in `workshop-db`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use eyre::{eyre, Result};

use crate::models::booking::Booking;
use crate::models::subscriber::Subscriber;

/// Booking list as read from the store, with the version it was read at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingSnapshot {
    pub bookings: Vec<Booking>,
    pub version: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The list was replaced; `version` is the new current version.
    Written { version: u64 },
    /// Someone else wrote since the caller's read; nothing was changed.
    VersionMismatch,
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Returns the whole booking list. A missing list reads as empty at version 0.
    async fn get(&self) -> Result<BookingSnapshot>;

    /// Replaces the whole list if the stored version still equals `expected_version`.
    async fn set(&self, bookings: Vec<Booking>, expected_version: u64) -> Result<WriteOutcome>;
}

#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Inserts the subscriber or refreshes the stored record for its id.
    async fn upsert(&self, subscriber: Subscriber) -> Result<()>;

    async fn list(&self) -> Result<Vec<Subscriber>>;
}

#[derive(Debug, Default)]
pub struct MemoryBookingStore {
    inner: Mutex<BookingSnapshot>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `bookings` at version 1.
    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self {
            inner: Mutex::new(BookingSnapshot { bookings, version: 1 }),
        }
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn get(&self) -> Result<BookingSnapshot> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| eyre!("booking store lock poisoned"))?;
        Ok(guard.clone())
    }

    async fn set(&self, bookings: Vec<Booking>, expected_version: u64) -> Result<WriteOutcome> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| eyre!("booking store lock poisoned"))?;

        if guard.version != expected_version {
            return Ok(WriteOutcome::VersionMismatch);
        }

        guard.bookings = bookings;
        guard.version += 1;
        Ok(WriteOutcome::Written { version: guard.version })
    }
}

#[derive(Debug, Default)]
pub struct MemorySubscriberStore {
    inner: Mutex<HashMap<i64, Subscriber>>,
}

impl MemorySubscriberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriberStore for MemorySubscriberStore {
    async fn upsert(&self, subscriber: Subscriber) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| eyre!("subscriber store lock poisoned"))?;
        guard.insert(subscriber.id, subscriber);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Subscriber>> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| eyre!("subscriber store lock poisoned"))?;
        let mut subscribers: Vec<Subscriber> = guard.values().cloned().collect();
        subscribers.sort_by_key(|s| s.subscribed_at);
        Ok(subscribers)
    }
}
