use async_trait::async_trait;
use eyre::Result;
use mockall::mock;
use workshop_core::models::booking::Booking;

use crate::dispatcher::Notifier;
use crate::telegram::{ChatId, MessageSender};

mock! {
    pub MessageSender {}

    #[async_trait]
    impl MessageSender for MessageSender {
        async fn send_text(&self, chat: ChatId, text: &str) -> Result<()>;
        async fn send_photo(&self, chat: ChatId, photo: &str, caption: &str) -> Result<()>;
    }
}

mock! {
    pub Notifier {}

    #[async_trait]
    impl Notifier for Notifier {
        async fn notify(&self, booking: &Booking, chat: ChatId) -> Result<()>;
    }
}
