//! Webhook update handling: record the author as a subscriber, answer commands.

use chrono::{DateTime, Utc};
use eyre::{Result, WrapErr};
use tracing::{debug, info, warn};
use workshop_core::schedule::WorkshopSchedule;
use workshop_core::store::SubscriberStore;

use crate::commands::BotCommand;
use crate::telegram::{ChatId, MessageSender};
use crate::updates::TelegramUpdate;

/// What the webhook did with an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Update carried no message, or the message had no author
    Ignored,
    /// Author recorded; `command` is what the reply was chosen from
    Handled { command: BotCommand, replied: bool },
}

/// Handles a single webhook update.
///
/// The author is upserted into the subscriber list before anything else, so
/// every user who writes to the bot can be reached by a broadcast. Replies
/// are best effort: a failed or disabled send is logged and the update still
/// counts as handled.
///
/// # Errors
///
/// Returns an error only when the subscriber store rejects the upsert.
pub async fn handle_update(
    update: TelegramUpdate,
    subscribers: &dyn SubscriberStore,
    sender: Option<&dyn MessageSender>,
    schedule: &WorkshopSchedule,
    now: DateTime<Utc>,
) -> Result<UpdateOutcome> {
    let Some(message) = update.message else {
        debug!(update_id = update.update_id, "Update without message, ignoring");
        return Ok(UpdateOutcome::Ignored);
    };

    let Some(subscriber) = message.subscriber(now) else {
        debug!(update_id = update.update_id, "Message without author, ignoring");
        return Ok(UpdateOutcome::Ignored);
    };

    let user_id = subscriber.id;
    subscribers
        .upsert(subscriber)
        .await
        .wrap_err_with(|| format!("Failed to save subscriber {}", user_id))?;

    let command = BotCommand::parse(message.text.as_deref().unwrap_or_default());
    info!(user_id, ?command, "Bot message received");

    let Some(sender) = sender else {
        debug!("Bot client not configured, skipping reply");
        return Ok(UpdateOutcome::Handled { command, replied: false });
    };

    let chat = ChatId(message.chat.id);
    let replied = match sender.send_text(chat, &command.reply(schedule)).await {
        Ok(()) => true,
        Err(e) => {
            warn!(%chat, error = %e, "Failed to send bot reply");
            false
        }
    };

    Ok(UpdateOutcome::Handled { command, replied })
}
