mod test_utils;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Days, Local, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use workshop_core::{
    events::BookingEvent,
    models::booking::Booking,
    schedule::Slot,
    store::{BookingSnapshot, BookingStore, MemoryBookingStore},
};
use workshop_db::mock::repositories::MockBookingStore;

use test_utils::{admin_header, booking_body, upcoming_saturday, TestContext};

#[tokio::test]
async fn test_create_booking_returns_created_booking() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let date = upcoming_saturday();

    let response = server
        .post("/api/bookings")
        .json(&booking_body("11:00", 2, date))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["startTime"], "11:00");
    assert_eq!(body["hours"], 2);
    assert_eq!(body["totalPrice"], 1400);
    assert_eq!(body["bookingDate"], json!(date));
    assert!(!body["id"].as_str().unwrap().is_empty());

    let events = ctx.events.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    let BookingEvent::Created(booking) = &events[0];
    assert_eq!(booking.start_time, Slot::at(11));
}

#[tokio::test]
async fn test_overlapping_booking_is_a_conflict() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let date = upcoming_saturday();

    server
        .post("/api/bookings")
        .json(&booking_body("10:00", 2, date))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/bookings")
        .json(&booking_body("11:00", 1, date))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["hour"], "11:00");
    assert_eq!(body["error"], "Time slot already booked: 11:00");
    assert_eq!(ctx.events.events.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_booking_past_closing_is_rejected() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/bookings")
        .json(&booking_body("13:00", 2, upcoming_saturday()))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Validation error"));
}

#[tokio::test]
async fn test_oversized_hours_are_a_validation_error() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for hours in [0, 5, 6_200_000] {
        let response = server
            .post("/api/bookings")
            .json(&booking_body("10:00", hours, upcoming_saturday()))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().starts_with("Validation error"));
    }

    assert!(ctx.bookings.get().await.unwrap().bookings.is_empty());
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/bookings")
        .json(&json!({ "startTime": "10:00", "hours": 1, "bookingDate": upcoming_saturday() }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("firstName"));
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_error() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/bookings")
        .json(&json!({ "firstName": "Masha", "hours": "two" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_listing_requires_passphrase() {
    let server = TestContext::new().server();

    server
        .get("/api/bookings")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/api/bookings")
        .add_header(
            axum::http::HeaderName::from_static("x-admin-passphrase"),
            axum::http::HeaderValue::from_static("wrong"),
        )
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_listing_prunes_past_bookings() {
    let today = Local::now().date_naive();
    let past = Booking {
        id: "last-month".to_string(),
        first_name: "Petya".to_string(),
        last_name: String::new(),
        age: None,
        gender: None,
        parent_phone: String::new(),
        start_time: Slot::at(10),
        hours: 1,
        total_price: 700,
        created_at: Utc::now(),
        booking_date: today - Days::new(30),
    };
    let store = Arc::new(MemoryBookingStore::with_bookings(vec![past]));
    let ctx = TestContext::with_store(store);
    let server = ctx.server();

    server
        .post("/api/bookings")
        .json(&booking_body("12:00", 1, upcoming_saturday()))
        .await
        .assert_status(StatusCode::CREATED);

    let (name, value) = admin_header();
    let response = server.get("/api/bookings").add_header(name, value).await;

    response.assert_status_ok();
    let bookings: Vec<Booking> = response.json();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].start_time, Slot::at(12));

    let snapshot = ctx.bookings.get().await.unwrap();
    assert_eq!(snapshot.bookings.len(), 1);
}

#[tokio::test]
async fn test_delete_booking_round_trip() {
    let server = TestContext::new().server();
    let date = upcoming_saturday();

    let mut body = booking_body("10:00", 1, date);
    body["id"] = json!("booking-1");
    server
        .post("/api/bookings")
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);

    let (name, value) = admin_header();
    let response = server
        .delete("/api/bookings/booking-1")
        .add_header(name.clone(), value.clone())
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "success": true }));

    let response = server
        .delete("/api/bookings/booking-1")
        .add_header(name.clone(), value.clone())
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let bookings: Vec<Booking> = server.get("/api/bookings").add_header(name, value).await.json();
    assert!(bookings.is_empty());
}

#[tokio::test]
async fn test_delete_requires_passphrase() {
    let server = TestContext::new().server();

    server
        .delete("/api/bookings/anything")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn test_store_outage() {
    let mut store = MockBookingStore::new();
    store
        .expect_get()
        .returning(|| Err(eyre::eyre!("connection refused")));
    store.expect_set().never();
    let server = TestContext::with_store(Arc::new(store)).server();

    // Writes fail loudly
    let response = server
        .post("/api/bookings")
        .json(&booking_body("10:00", 1, upcoming_saturday()))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    // Reads degrade to an empty list
    let (name, value) = admin_header();
    let response = server.get("/api/bookings").add_header(name, value).await;
    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[test_log::test(tokio::test)]
async fn test_concurrent_creates_for_same_hour() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let date = upcoming_saturday();

    let (first, second) = tokio::join!(
        async { server.post("/api/bookings").json(&booking_body("13:00", 1, date)).await },
        async { server.post("/api/bookings").json(&booking_body("13:00", 1, date)).await },
    );

    let mut statuses = vec![first.status_code(), second.status_code()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);

    let snapshot: BookingSnapshot = ctx.bookings.get().await.unwrap();
    assert_eq!(snapshot.bookings.len(), 1);
}
