use async_trait::async_trait;
use mockall::mock;
use workshop_core::models::booking::Booking;
use workshop_core::models::subscriber::Subscriber;
use workshop_core::store::{BookingSnapshot, BookingStore, SubscriberStore, WriteOutcome};

// Mock stores for testing
mock! {
    pub BookingStore {}

    #[async_trait]
    impl BookingStore for BookingStore {
        async fn get(&self) -> eyre::Result<BookingSnapshot>;

        async fn set(
            &self,
            bookings: Vec<Booking>,
            expected_version: u64,
        ) -> eyre::Result<WriteOutcome>;
    }
}

mock! {
    pub SubscriberStore {}

    #[async_trait]
    impl SubscriberStore for SubscriberStore {
        async fn upsert(&self, subscriber: Subscriber) -> eyre::Result<()>;

        async fn list(&self) -> eyre::Result<Vec<Subscriber>>;
    }
}
