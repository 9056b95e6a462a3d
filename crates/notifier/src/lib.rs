//! # Workshop Notifier
//!
//! Telegram side of the workshop: the Bot API client, message templates,
//! replies to bot commands, the booking-notification dispatcher and the
//! subscriber broadcast.
//!
//! Booking notifications never run on the request path. The booking service
//! pushes events into the [`dispatcher::ChannelOutbox`]; a [`dispatcher::Dispatcher`]
//! task drains them and delivers one message per operator chat.

pub mod broadcast;
pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod handlers;
pub mod messages;
pub mod mock;
pub mod telegram;
pub mod updates;

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::dispatcher::{BookingNotifier, ChannelOutbox, Dispatcher};
use crate::telegram::{ChatId, MessageSender, TelegramClient};

/// Running notification pipeline returned by [`start_notifier`].
pub struct NotifierHandle {
    /// Sink to hand to the booking service
    pub outbox: ChannelOutbox,
    /// Client shared with the webhook and broadcast endpoints
    pub sender: Arc<dyn MessageSender>,
    /// Dispatcher task; finishes once every outbox sender is dropped
    pub task: JoinHandle<()>,
}

/// Builds the Telegram client and spawns the booking-notification dispatcher.
///
/// # Arguments
///
/// * `config` - Bot token, operator chat ids and timeouts
///
/// # Returns
///
/// * `Ok(NotifierHandle)` with the outbox to plug into the booking service
/// * `Err` if the HTTP client cannot be built
pub fn start_notifier(config: &config::NotifierConfig) -> Result<NotifierHandle> {
    let client: Arc<dyn MessageSender> = Arc::new(TelegramClient::new(config)?);
    let recipients: Vec<ChatId> = config.admin_chat_ids.iter().copied().map(ChatId).collect();

    info!(recipients = recipients.len(), "Starting booking notification dispatcher");

    let (outbox, receiver) = dispatcher::outbox();
    let notifier = BookingNotifier::new(client.clone());
    let dispatcher = Dispatcher::new(notifier, recipients, config.send_timeout());
    let task = tokio::spawn(dispatcher.run(receiver));

    Ok(NotifierHandle {
        outbox,
        sender: client,
        task,
    })
}

/// Waits up to `grace` for the dispatcher to deliver what is still queued.
///
/// The dispatcher only stops once every [`ChannelOutbox`] is dropped; if it
/// is still running after `grace` the task is aborted and the rest of the
/// queue is lost.
///
/// # Returns
///
/// * `true` if the dispatcher finished on its own
pub async fn drain_dispatcher(task: JoinHandle<()>, grace: Duration) -> bool {
    let abort = task.abort_handle();

    match tokio::time::timeout(grace, task).await {
        Ok(Ok(())) => {
            info!("Notification dispatcher finished");
            true
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Notification dispatcher task failed");
            false
        }
        Err(_) => {
            warn!(?grace, "Notification dispatcher still busy, dropping queued notifications");
            abort.abort();
            false
        }
    }
}
