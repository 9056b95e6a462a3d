mod test_utils;

use axum::http::StatusCode;
use chrono::{Datelike, Weekday};
use pretty_assertions::assert_eq;
use rstest::rstest;
use workshop_core::{models::booking::Availability, schedule::Slot};

use test_utils::{booking_body, upcoming_saturday, TestContext};

#[tokio::test]
async fn test_slots_default_to_next_saturday() {
    let server = TestContext::new().server();

    let response = server.get("/api/slots").await;

    response.assert_status_ok();
    let availability: Availability = response.json();
    assert_eq!(availability.date, upcoming_saturday());
    assert_eq!(availability.date.weekday(), Weekday::Sat);
    assert_eq!(availability.price_per_hour, 700);
    assert_eq!(
        availability
            .options
            .iter()
            .map(|o| (o.start_time, o.max_hours))
            .collect::<Vec<_>>(),
        vec![
            (Slot::at(10), 4),
            (Slot::at(11), 3),
            (Slot::at(12), 2),
            (Slot::at(13), 1),
        ]
    );
}

#[tokio::test]
async fn test_slots_reflect_existing_bookings() {
    let server = TestContext::new().server();
    let date = upcoming_saturday();

    server
        .post("/api/bookings")
        .json(&booking_body("11:00", 1, date))
        .await
        .assert_status(StatusCode::CREATED);

    let availability: Availability = server
        .get("/api/slots")
        .add_query_param("date", date)
        .await
        .json();

    assert_eq!(availability.available, vec![Slot::at(10), Slot::at(12), Slot::at(13)]);
    assert_eq!(
        availability
            .options
            .iter()
            .map(|o| o.max_hours)
            .collect::<Vec<_>>(),
        vec![1, 2, 1]
    );
}

#[tokio::test]
async fn test_other_dates_are_unaffected() {
    let server = TestContext::new().server();
    let date = upcoming_saturday();

    server
        .post("/api/bookings")
        .json(&booking_body("10:00", 4, date))
        .await
        .assert_status(StatusCode::CREATED);

    let following = date + chrono::Days::new(7);
    let availability: Availability = server
        .get("/api/slots")
        .add_query_param("date", following)
        .await
        .json();

    assert_eq!(availability.available.len(), 4);
}

#[rstest]
#[case("24.10.2026")]
#[case("2026-13-01")]
#[case("soon")]
#[tokio::test]
async fn test_invalid_date_is_rejected(#[case] date: &str) {
    let server = TestContext::new().server();

    let response = server.get("/api/slots").add_query_param("date", date).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
