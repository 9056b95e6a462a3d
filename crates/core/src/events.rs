//! Booking events handed to the notification side after a successful write.

use eyre::Result;
use tracing::debug;

use crate::models::booking::Booking;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingEvent {
    Created(Booking),
}

/// Destination for booking events
///
/// `emit` must not block on delivery: implementations queue the event and
/// return. A failed `emit` never undoes the booking that produced it.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: BookingEvent) -> Result<()>;
}

/// Sink used when no notification channel is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardEvents;

impl EventSink for DiscardEvents {
    fn emit(&self, event: BookingEvent) -> Result<()> {
        debug!(?event, "notifications disabled, dropping booking event");
        Ok(())
    }
}
