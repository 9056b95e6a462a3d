//! # Slot Engine
//!
//! Pure functions over a list of bookings that answer two questions for a
//! calendar date: which hours are still free, and whether a new request fits.
//!
//! ## Occupancy model
//!
//! A booking starting at hour `s` and lasting `h` hours occupies the hours
//! `s, s+1, ..., s+h-1`. Two bookings on the same date conflict when their
//! occupied hours intersect. Nothing here touches storage; callers pass the
//! full booking list and get new values back.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use thiserror::Error;

use crate::errors::BookingError;
use crate::models::booking::Booking;
use crate::schedule::{Slot, WorkshopSchedule};

/// Reasons a request does not fit the schedule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("{0} is not one of the workshop slots")]
    UnknownSlot(Slot),

    #[error("Booking length must be between 1 and {max} hours, got {hours}")]
    InvalidHours { hours: u32, max: u32 },

    #[error("Booking from {start} for {hours} hours ends after closing at {closing}:00")]
    PastClosing { start: Slot, hours: u32, closing: u32 },

    #[error("Time slot already booked: {hour}")]
    Conflict { hour: Slot },
}

impl From<SlotError> for BookingError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::Conflict { hour } => BookingError::Conflict { hour },
            other => BookingError::Validation(other.to_string()),
        }
    }
}

/// Hours covered by a booking of `hours` hours starting at `start`.
pub fn expand(start: Slot, hours: u32) -> impl Iterator<Item = Slot> {
    (0..hours).map(move |i| start.offset(i))
}

/// Every hour taken by a booking on `date`.
pub fn occupied_hours(bookings: &[Booking], date: NaiveDate) -> BTreeSet<Slot> {
    bookings
        .iter()
        .filter(|b| b.booking_date == date)
        .flat_map(|b| expand(b.start_time, b.hours))
        .collect()
}

/// Schedule slots not taken on `date`, in chronological order.
pub fn available_slots(schedule: &WorkshopSchedule, bookings: &[Booking], date: NaiveDate) -> Vec<Slot> {
    let occupied = occupied_hours(bookings, date);
    schedule
        .slots()
        .into_iter()
        .filter(|slot| !occupied.contains(slot))
        .collect()
}

/// Longest booking that can start at `start` given the free slots.
///
/// Counts consecutive free hours from `start` up to the last bookable hour
/// (`closing_hour - 1`) and never proposes more than `closing_hour - start`.
pub fn max_bookable_hours(start: Slot, available: &[Slot], closing_hour: u32) -> u32 {
    let mut hours = 0;
    let mut hour = start;

    while hour.hour() < closing_hour && available.contains(&hour) {
        hours += 1;
        hour = hour.offset(1);
    }

    hours.min(closing_hour.saturating_sub(start.hour()))
}

/// Checks a request of `hours` hours at `start` on `date` against the schedule
/// and the existing bookings.
///
/// The first colliding hour, in chronological order, is reported on conflict.
/// Dates in the past are not rejected here.
pub fn validate_request(
    schedule: &WorkshopSchedule,
    bookings: &[Booking],
    date: NaiveDate,
    start: Slot,
    hours: u32,
) -> Result<(), SlotError> {
    if !schedule.contains(start) {
        return Err(SlotError::UnknownSlot(start));
    }

    if hours == 0 || hours > schedule.slot_count {
        return Err(SlotError::InvalidHours {
            hours,
            max: schedule.slot_count,
        });
    }

    let closing = schedule.closing_hour();
    if start.hour() + hours > closing {
        return Err(SlotError::PastClosing { start, hours, closing });
    }

    let occupied = occupied_hours(bookings, date);
    match expand(start, hours).find(|hour| occupied.contains(hour)) {
        Some(hour) => Err(SlotError::Conflict { hour }),
        None => Ok(()),
    }
}

/// Splits bookings into those dated strictly before `as_of` and the rest.
///
/// Returns `(stale, active)`; relative order is preserved in both.
pub fn partition_stale(bookings: Vec<Booking>, as_of: NaiveDate) -> (Vec<Booking>, Vec<Booking>) {
    bookings
        .into_iter()
        .partition(|b| b.booking_date < as_of)
}
