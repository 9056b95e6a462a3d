#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::{Local, NaiveDate};
use serde_json::{json, Value};
use workshop_api::{middleware::auth::AdminGate, router, ApiState};
use workshop_core::{
    dates,
    events::{BookingEvent, EventSink},
    schedule::WorkshopSchedule,
    service::BookingService,
    store::{BookingStore, MemoryBookingStore, MemorySubscriberStore},
};
use workshop_notifier::telegram::MessageSender;

pub const PASSPHRASE: &str = "kiln-at-ten";

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<BookingEvent>>,
}

impl EventSink for RecordingSink {
    fn emit(&self, event: BookingEvent) -> eyre::Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

pub struct TestContext {
    pub bookings: Arc<dyn BookingStore>,
    pub subscribers: Arc<MemorySubscriberStore>,
    pub events: Arc<RecordingSink>,
    pub messenger: Option<Arc<dyn MessageSender>>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryBookingStore::new()))
    }

    pub fn with_store(bookings: Arc<dyn BookingStore>) -> Self {
        Self {
            bookings,
            subscribers: Arc::new(MemorySubscriberStore::new()),
            events: Arc::new(RecordingSink::default()),
            messenger: None,
        }
    }

    pub fn with_messenger(mut self, messenger: impl MessageSender + 'static) -> Self {
        self.messenger = Some(Arc::new(messenger));
        self
    }

    pub fn build_state(&self) -> Arc<ApiState> {
        Arc::new(ApiState {
            bookings: BookingService::new(
                self.bookings.clone(),
                self.events.clone(),
                WorkshopSchedule::default(),
            ),
            subscribers: self.subscribers.clone(),
            messenger: self.messenger.clone(),
            admin: AdminGate::new(PASSPHRASE).unwrap(),
            broadcast_delay: Duration::ZERO,
        })
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(router(self.build_state())).unwrap()
    }
}

pub fn admin_header() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-admin-passphrase"),
        HeaderValue::from_static(PASSPHRASE),
    )
}

/// Saturday after today, so listings never prune it.
pub fn upcoming_saturday() -> NaiveDate {
    dates::next_saturday(Local::now().date_naive())
}

pub fn booking_body(start: &str, hours: u32, date: NaiveDate) -> Value {
    json!({
        "firstName": "Masha",
        "lastName": "Ivanova",
        "age": 8,
        "gender": "female",
        "parentPhone": "+79991234567",
        "startTime": start,
        "hours": hours,
        "bookingDate": date,
    })
}
