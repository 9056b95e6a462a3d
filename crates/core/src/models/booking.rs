use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::schedule::{Slot, WorkshopSchedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub parent_phone: String,
    pub start_time: Slot,
    pub hours: u32,
    pub total_price: u32,
    pub created_at: DateTime<Utc>,
    pub booking_date: NaiveDate,
}

impl Booking {
    /// Hour at which the booking ends (exclusive).
    pub fn end_time(&self) -> Slot {
        self.start_time.offset(self.hours)
    }

    /// Participant name as shown to operators.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Payload of a create-booking call
///
/// Every field is optional at the serde level so that missing values surface
/// as [`BookingError::Validation`] instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub parent_phone: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub hours: Option<u32>,
    #[serde(default)]
    pub total_price: Option<u32>,
    #[serde(default)]
    pub booking_date: Option<NaiveDate>,
}

impl CreateBookingRequest {
    /// Checks required fields and builds the booking that would be stored.
    ///
    /// Only field presence and shape are checked here; whether the interval
    /// fits the schedule and is free is decided by the slot engine.
    pub fn into_booking(self, schedule: &WorkshopSchedule, now: DateTime<Utc>) -> BookingResult<Booking> {
        let id = match self.id {
            Some(id) if id.trim().is_empty() => {
                return Err(BookingError::Validation("Booking id must not be blank".to_string()));
            }
            Some(id) => id,
            None => Uuid::new_v4().to_string(),
        };

        let first_name = self.first_name.trim().to_string();
        if first_name.is_empty() {
            return Err(BookingError::Validation("Missing required field: firstName".to_string()));
        }

        let start_time: Slot = self
            .start_time
            .ok_or_else(|| BookingError::Validation("Missing required field: startTime".to_string()))?
            .parse()
            .map_err(|e: crate::schedule::SlotParseError| BookingError::Validation(e.to_string()))?;

        let hours = self
            .hours
            .ok_or_else(|| BookingError::Validation("Missing required field: hours".to_string()))?;
        if hours == 0 || hours > schedule.slot_count {
            return Err(BookingError::Validation(format!(
                "Hours must be between 1 and {}, got {}",
                schedule.slot_count, hours
            )));
        }

        let booking_date = self
            .booking_date
            .ok_or_else(|| BookingError::Validation("Missing required field: bookingDate".to_string()))?;

        let total_price = self
            .total_price
            .unwrap_or_else(|| schedule.price_for(hours));

        Ok(Booking {
            id,
            first_name,
            last_name: self.last_name.trim().to_string(),
            age: self.age,
            gender: self.gender,
            parent_phone: self.parent_phone.trim().to_string(),
            start_time,
            hours,
            total_price,
            created_at: now,
            booking_date,
        })
    }
}

/// One bookable start time together with the longest booking it allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotOption {
    pub start_time: Slot,
    pub max_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub date: NaiveDate,
    pub available: Vec<Slot>,
    pub options: Vec<SlotOption>,
    pub booking_open: bool,
    pub price_per_hour: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBookingResponse {
    pub success: bool,
}
