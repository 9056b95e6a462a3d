//! # Booking notification dispatcher
//!
//! The booking service only ever sees [`ChannelOutbox`], whose `emit` pushes
//! the event onto an unbounded channel and returns. [`Dispatcher::run`]
//! drains the channel in its own task and delivers each event to every
//! operator chat, one bounded attempt per chat.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use eyre::{eyre, Result};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use workshop_core::events::{BookingEvent, EventSink};
use workshop_core::models::booking::Booking;

use crate::messages;
use crate::telegram::{ChatId, MessageSender};

/// Delivers a single booking notification to one chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, booking: &Booking, chat: ChatId) -> Result<()>;
}

/// [`Notifier`] that renders the operator message and sends it as text.
pub struct BookingNotifier {
    sender: Arc<dyn MessageSender>,
}

impl BookingNotifier {
    pub fn new(sender: Arc<dyn MessageSender>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl Notifier for BookingNotifier {
    async fn notify(&self, booking: &Booking, chat: ChatId) -> Result<()> {
        self.sender
            .send_text(chat, &messages::booking_notification(booking))
            .await
    }
}

pub type OutboxReceiver = mpsc::UnboundedReceiver<BookingEvent>;

/// [`EventSink`] side of the notification queue.
#[derive(Debug, Clone)]
pub struct ChannelOutbox {
    tx: mpsc::UnboundedSender<BookingEvent>,
}

impl EventSink for ChannelOutbox {
    fn emit(&self, event: BookingEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|_| eyre!("notification dispatcher is no longer running"))
    }
}

/// Creates a connected outbox and receiver.
pub fn outbox() -> (ChannelOutbox, OutboxReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelOutbox { tx }, rx)
}

/// Delivery summary for one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
}

pub struct Dispatcher<N> {
    notifier: N,
    recipients: Vec<ChatId>,
    timeout: Duration,
}

impl<N: Notifier> Dispatcher<N> {
    pub fn new(notifier: N, recipients: Vec<ChatId>, timeout: Duration) -> Self {
        Self {
            notifier,
            recipients,
            timeout,
        }
    }

    /// Sends one event to every recipient. Failures and timeouts are counted,
    /// never retried.
    pub async fn dispatch(&self, event: &BookingEvent) -> DispatchReport {
        let BookingEvent::Created(booking) = event;
        let mut report = DispatchReport::default();

        for &chat in &self.recipients {
            match tokio::time::timeout(self.timeout, self.notifier.notify(booking, chat)).await {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(e)) => {
                    warn!(%chat, id = %booking.id, error = %e, "Booking notification failed");
                    report.failed += 1;
                }
                Err(_) => {
                    warn!(%chat, id = %booking.id, timeout = ?self.timeout, "Booking notification timed out");
                    report.failed += 1;
                }
            }
        }

        if report.failed > 0 && report.delivered == 0 && !self.recipients.is_empty() {
            error!(id = %booking.id, "No operator received the booking notification");
        }

        report
    }

    /// Drains the outbox until every [`ChannelOutbox`] is dropped.
    pub async fn run(self, mut receiver: OutboxReceiver) {
        if self.recipients.is_empty() {
            warn!("No operator chats configured, booking notifications will be dropped");
        }

        while let Some(event) = receiver.recv().await {
            let report = self.dispatch(&event).await;
            info!(
                delivered = report.delivered,
                failed = report.failed,
                "Booking notification dispatched"
            );
        }

        info!("Notification outbox closed, dispatcher stopping");
    }
}
