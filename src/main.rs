use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::{info, warn};
use workshop_api::{config::ApiConfig, connect_stores, init_tracing, middleware::auth::AdminGate, ApiState};
use workshop_core::{
    events::{DiscardEvents, EventSink},
    schedule::WorkshopSchedule,
    service::BookingService,
};
use workshop_notifier::{drain_dispatcher, start_notifier};

/// How long queued booking notifications may take to go out on shutdown
const NOTIFICATION_DRAIN_GRACE: Duration = Duration::from_secs(30);

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down gracefully..."),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully..."),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;

    let stores = connect_stores(&config).await?;
    let schedule = WorkshopSchedule::default();

    // Notifications run on their own task; without a bot token events are dropped
    let (events, messenger, broadcast_delay, dispatcher) = match &config.notifier {
        Some(notifier) => {
            let handle = start_notifier(notifier)?;
            let events: Arc<dyn EventSink> = Arc::new(handle.outbox);
            (events, Some(handle.sender), notifier.broadcast_delay(), Some(handle.task))
        }
        None => {
            info!("TELEGRAM_BOT_TOKEN not set, booking notifications disabled");
            let events: Arc<dyn EventSink> = Arc::new(DiscardEvents);
            (events, None, Duration::ZERO, None)
        }
    };

    let state = ApiState {
        bookings: BookingService::new(stores.bookings, events, schedule),
        subscribers: stores.subscribers,
        messenger,
        admin: AdminGate::new(&config.admin_passphrase)?,
        broadcast_delay,
    };

    // Start API server
    workshop_api::start_server(config, Arc::new(state), shutdown_signal()).await?;

    // The server dropped the last outbox sender; let the dispatcher empty the queue
    if let Some(task) = dispatcher {
        drain_dispatcher(task, NOTIFICATION_DRAIN_GRACE).await;
    }

    Ok(())
}
