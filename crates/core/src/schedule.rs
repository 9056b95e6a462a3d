//! # Workshop Schedule
//!
//! The workshop runs a single operating window every Saturday, split into
//! one-hour slots. Slots are identified by their local start hour and are
//! rendered as `"H:00"` labels on the wire (`"10:00"`, `"11:00"`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opening hour of the operating window.
pub const OPENING_HOUR: u32 = 10;

/// Number of one-hour slots in the operating window.
pub const SLOT_COUNT: u32 = 4;

/// Price of one hour, in roubles.
pub const PRICE_PER_HOUR: u32 = 700;

/// One-hour slot, identified by its local start hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slot(u32);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid slot label: {0:?}")]
pub struct SlotParseError(pub String);

impl Slot {
    pub fn at(hour: u32) -> Self {
        Slot(hour)
    }

    pub fn hour(self) -> u32 {
        self.0
    }

    /// The slot `hours` hours after this one.
    pub fn offset(self, hours: u32) -> Self {
        Slot(self.0 + hours)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:00", self.0)
    }
}

impl FromStr for Slot {
    type Err = SlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minutes) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| SlotParseError(s.to_string()))?;

        if minutes != "00" {
            return Err(SlotParseError(s.to_string()));
        }

        match hour.parse::<u32>() {
            Ok(hour) if hour < 24 => Ok(Slot(hour)),
            _ => Err(SlotParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Slot {
    type Error = SlotParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        slot.to_string()
    }
}

/// Fixed daily schedule of the workshop
///
/// These values are configuration constants rather than runtime settings;
/// [`WorkshopSchedule::default`] returns the schedule the workshop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopSchedule {
    /// Start hour of the first slot
    pub opening_hour: u32,

    /// Number of consecutive one-hour slots
    pub slot_count: u32,

    /// Price of a single hour
    pub price_per_hour: u32,
}

impl Default for WorkshopSchedule {
    fn default() -> Self {
        Self {
            opening_hour: OPENING_HOUR,
            slot_count: SLOT_COUNT,
            price_per_hour: PRICE_PER_HOUR,
        }
    }
}

impl WorkshopSchedule {
    /// All slots in chronological order.
    pub fn slots(&self) -> Vec<Slot> {
        (self.opening_hour..self.closing_hour()).map(Slot::at).collect()
    }

    /// Hour at which the operating window ends (exclusive).
    pub fn closing_hour(&self) -> u32 {
        self.opening_hour + self.slot_count
    }

    pub fn contains(&self, slot: Slot) -> bool {
        (self.opening_hour..self.closing_hour()).contains(&slot.hour())
    }

    /// Saturates instead of wrapping on absurd inputs.
    pub fn price_for(&self, hours: u32) -> u32 {
        hours.saturating_mul(self.price_per_hour)
    }
}
