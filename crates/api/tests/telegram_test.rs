mod test_utils;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use workshop_core::{models::subscriber::SubscriberListResponse, store::SubscriberStore};
use workshop_notifier::{mock::MockMessageSender, telegram::ChatId};

use test_utils::{admin_header, TestContext};

fn update(user_id: i64, text: &str) -> Value {
    json!({
        "update_id": user_id * 100,
        "message": {
            "message_id": 1,
            "from": { "id": user_id, "is_bot": false, "first_name": "Olga" },
            "chat": { "id": user_id, "type": "private" },
            "date": 1760000000,
            "text": text
        }
    })
}

#[tokio::test]
async fn test_webhook_registers_and_replies() {
    let mut sender = MockMessageSender::new();
    sender
        .expect_send_text()
        .withf(|chat, text| *chat == ChatId(7) && text.contains("700 ₽"))
        .times(1)
        .returning(|_, _| Ok(()));
    let ctx = TestContext::new().with_messenger(sender);
    let server = ctx.server();

    let response = server.post("/api/telegram/webhook").json(&update(7, "/price")).await;

    response.assert_status_ok();
    response.assert_json(&json!({ "ok": true }));
    assert_eq!(ctx.subscribers.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_webhook_without_bot_client_still_registers() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .post("/api/telegram/webhook")
        .json(&update(7, "/start"))
        .await
        .assert_status_ok();
    server
        .post("/api/telegram/webhook")
        .json(&update(8, "hello"))
        .await
        .assert_status_ok();

    let (name, value) = admin_header();
    let response = server.get("/api/broadcast").add_header(name, value).await;

    response.assert_status_ok();
    let list: SubscriberListResponse = response.json();
    assert_eq!(list.count, 2);
    assert_eq!(list.users.len(), 2);
}

#[tokio::test]
async fn test_subscriber_list_requires_passphrase() {
    let server = TestContext::new().server();

    server
        .get("/api/broadcast")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_webhook_store_failure_asks_for_redelivery() {
    use std::sync::Arc;
    use std::time::Duration;
    use workshop_api::{middleware::auth::AdminGate, router, ApiState};
    use workshop_core::{
        schedule::WorkshopSchedule, service::BookingService, store::MemoryBookingStore,
    };
    use workshop_db::mock::repositories::MockSubscriberStore;

    let mut subscribers = MockSubscriberStore::new();
    subscribers
        .expect_upsert()
        .times(1)
        .returning(|_| Err(eyre::eyre!("pool timed out")));

    let ctx = TestContext::new();
    let state = Arc::new(ApiState {
        bookings: BookingService::new(
            Arc::new(MemoryBookingStore::new()),
            ctx.events.clone(),
            WorkshopSchedule::default(),
        ),
        subscribers: Arc::new(subscribers),
        messenger: None,
        admin: AdminGate::new(test_utils::PASSPHRASE).unwrap(),
        broadcast_delay: Duration::ZERO,
    });
    let server = axum_test::TestServer::new(router(state)).unwrap();

    server
        .post("/api/telegram/webhook")
        .json(&update(9, "/start"))
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}
