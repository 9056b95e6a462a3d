//! # Booking Service
//!
//! Orchestrates the record store and the slot engine to list, create and
//! remove bookings.
//!
//! Every mutation is a read-modify-write cycle against the versioned store:
//! read the list, decide on the new list, write it back only if nobody wrote
//! in between. On a version mismatch the cycle starts over from a fresh read,
//! so a create is always validated against the list it is written on top of.
//! Two racing requests for the same free hour therefore cannot both succeed.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use eyre::eyre;
use tracing::{debug, info, warn};

use crate::dates;
use crate::errors::{BookingError, BookingResult};
use crate::events::{BookingEvent, EventSink};
use crate::models::booking::{Availability, Booking, CreateBookingRequest, SlotOption};
use crate::schedule::WorkshopSchedule;
use crate::slots;
use crate::store::{BookingStore, WriteOutcome};

/// Read-modify-write attempts before a mutation gives up.
pub const MAX_WRITE_ATTEMPTS: usize = 5;

/// Result of pruning bookings dated before a cutoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneOutcome {
    pub kept: Vec<Booking>,
    pub removed: usize,
}

/// What a single read-modify-write step decided to do.
enum Plan<T> {
    Write(Vec<Booking>, T),
    Skip(T),
}

pub struct BookingService {
    store: Arc<dyn BookingStore>,
    events: Arc<dyn EventSink>,
    schedule: WorkshopSchedule,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>, events: Arc<dyn EventSink>, schedule: WorkshopSchedule) -> Self {
        Self { store, events, schedule }
    }

    pub fn schedule(&self) -> &WorkshopSchedule {
        &self.schedule
    }

    /// Drops bookings dated strictly before `as_of` from the store.
    ///
    /// The store is only written when at least one booking was removed.
    pub async fn prune(&self, as_of: NaiveDate) -> BookingResult<PruneOutcome> {
        let outcome = self
            .read_modify_write("prune", |bookings| {
                let (stale, active) = slots::partition_stale(bookings, as_of);
                let outcome = PruneOutcome {
                    removed: stale.len(),
                    kept: active.clone(),
                };
                if stale.is_empty() {
                    Ok(Plan::Skip(outcome))
                } else {
                    Ok(Plan::Write(active, outcome))
                }
            })
            .await?;

        if outcome.removed > 0 {
            info!(removed = outcome.removed, %as_of, "Pruned stale bookings");
        }

        Ok(outcome)
    }

    /// Bookings dated on or after `as_of`, pruning older ones on the way.
    ///
    /// Never fails: an unreachable store reads as an empty list.
    pub async fn list(&self, as_of: NaiveDate) -> Vec<Booking> {
        match self.prune(as_of).await {
            Ok(outcome) => outcome.kept,
            Err(e) => {
                warn!(error = %e, "Booking store unavailable, listing no bookings");
                Vec::new()
            }
        }
    }

    /// Free slots on `date` and the longest booking each one allows.
    ///
    /// An unreachable store reads as an empty list, leaving every slot free;
    /// `create` still validates against the real list before writing.
    pub async fn availability(&self, date: NaiveDate, today: NaiveDate) -> Availability {
        let bookings = match self.store.get().await {
            Ok(snapshot) => snapshot.bookings,
            Err(e) => {
                warn!(error = %e, "Booking store unavailable, reporting all slots free");
                Vec::new()
            }
        };

        let available = slots::available_slots(&self.schedule, &bookings, date);
        let closing = self.schedule.closing_hour();
        let options = available
            .iter()
            .map(|&start| SlotOption {
                start_time: start,
                max_hours: slots::max_bookable_hours(start, &available, closing),
            })
            .collect();

        Availability {
            date,
            available,
            options,
            booking_open: dates::booking_window_open(today),
            price_per_hour: self.schedule.price_per_hour,
        }
    }

    /// Validates and stores a new booking, then queues its notification.
    pub async fn create(&self, request: CreateBookingRequest, now: DateTime<Utc>) -> BookingResult<Booking> {
        let booking = request.into_booking(&self.schedule, now)?;

        let created = self
            .read_modify_write("create", |mut bookings| {
                if bookings.iter().any(|b| b.id == booking.id) {
                    return Err(BookingError::Validation(format!(
                        "Booking with ID {} already exists",
                        booking.id
                    )));
                }

                slots::validate_request(
                    &self.schedule,
                    &bookings,
                    booking.booking_date,
                    booking.start_time,
                    booking.hours,
                )?;

                bookings.push(booking.clone());
                Ok(Plan::Write(bookings, booking.clone()))
            })
            .await?;

        info!(
            id = %created.id,
            date = %created.booking_date,
            start = %created.start_time,
            hours = created.hours,
            "Booking created"
        );

        if let Err(e) = self.events.emit(BookingEvent::Created(created.clone())) {
            warn!(id = %created.id, error = %e, "Failed to queue booking notification");
        }

        Ok(created)
    }

    /// Removes the booking with the given id.
    pub async fn remove(&self, id: &str) -> BookingResult<()> {
        self.read_modify_write("remove", |bookings| {
            let before = bookings.len();
            let remaining: Vec<Booking> = bookings.into_iter().filter(|b| b.id != id).collect();

            if remaining.len() == before {
                return Err(BookingError::NotFound(format!("Booking with ID {} not found", id)));
            }

            Ok(Plan::Write(remaining, ()))
        })
        .await?;

        info!(id, "Booking removed");
        Ok(())
    }

    async fn read_modify_write<T, F>(&self, operation: &str, mut plan: F) -> BookingResult<T>
    where
        F: FnMut(Vec<Booking>) -> BookingResult<Plan<T>> + Send,
        T: Send,
    {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let snapshot = self.store.get().await.map_err(BookingError::StoreUnavailable)?;

            let (next, result) = match plan(snapshot.bookings)? {
                Plan::Skip(result) => return Ok(result),
                Plan::Write(next, result) => (next, result),
            };

            match self
                .store
                .set(next, snapshot.version)
                .await
                .map_err(BookingError::StoreUnavailable)?
            {
                WriteOutcome::Written { version } => {
                    debug!(operation, version, "Booking list written");
                    return Ok(result);
                }
                WriteOutcome::VersionMismatch => {
                    debug!(operation, attempt, "Booking list changed since read, retrying");
                }
            }
        }

        Err(BookingError::StoreUnavailable(eyre!(
            "booking list kept changing during {}, gave up after {} attempts",
            operation,
            MAX_WRITE_ATTEMPTS
        )))
    }
}
