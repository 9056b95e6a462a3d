use std::time::Duration;

use tracing::{info, warn};
use workshop_core::models::subscriber::{BroadcastResponse, Subscriber};

use crate::telegram::{ChatId, MessageSender};

/// Sends a message, or a photo captioned with it, to every subscriber.
///
/// Subscribers are messaged one at a time with `delay` between sends to stay
/// under the Bot API rate limits. A failed send is counted and skipped.
pub async fn broadcast(
    sender: &dyn MessageSender,
    subscribers: &[Subscriber],
    message: &str,
    photo: Option<&str>,
    delay: Duration,
) -> BroadcastResponse {
    let mut response = BroadcastResponse {
        success: true,
        total: subscribers.len(),
        ..Default::default()
    };

    for (i, subscriber) in subscribers.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let chat = ChatId(subscriber.chat_id);
        let result = match photo {
            Some(photo) => sender.send_photo(chat, photo, message).await,
            None => sender.send_text(chat, message).await,
        };

        match result {
            Ok(()) => response.sent += 1,
            Err(e) => {
                warn!(%chat, error = %e, "Broadcast message failed");
                response.failed += 1;
            }
        }
    }

    info!(
        sent = response.sent,
        failed = response.failed,
        total = response.total,
        "Broadcast finished"
    );

    response
}
