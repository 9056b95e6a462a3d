//! # Workshop API
//!
//! HTTP surface of the pottery workshop booking service: free slots, booking
//! creation and removal, the Telegram webhook and the admin broadcast.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into booking service calls
//! - **Middleware**: Admin passphrase gate and error mapping
//! - **Config**: Environment configuration
//!
//! Business rules live in `workshop-core`; this crate only wires them to axum.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Admin gate and error mapping
pub mod middleware;
/// Route definitions
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use workshop_core::{
    service::BookingService,
    store::{BookingStore, MemoryBookingStore, MemorySubscriberStore, SubscriberStore},
};
use workshop_db::repositories::{booking::PgBookingStore, subscriber::PgSubscriberStore};
use workshop_notifier::telegram::MessageSender;

use crate::middleware::auth::{AdminGate, ADMIN_HEADER};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Booking list operations
    pub bookings: BookingService,
    /// Users who have written to the bot
    pub subscribers: Arc<dyn SubscriberStore>,
    /// Bot client for webhook replies and broadcasts; `None` when Telegram
    /// is not configured
    pub messenger: Option<Arc<dyn MessageSender>>,
    /// Hashed admin passphrase
    pub admin: AdminGate,
    /// Pause between two broadcast messages
    pub broadcast_delay: Duration,
}

/// Record stores selected by configuration.
pub struct Stores {
    pub bookings: Arc<dyn BookingStore>,
    pub subscribers: Arc<dyn SubscriberStore>,
}

/// Opens PostgreSQL-backed stores when `DATABASE_URL` is set, in-memory
/// ones otherwise.
///
/// The schema is created on connect, so a fresh database works without
/// running `db-migrate` first.
pub async fn connect_stores(config: &config::ApiConfig) -> Result<Stores> {
    let Some(url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set, bookings are kept in memory and lost on restart");
        return Ok(Stores {
            bookings: Arc::new(MemoryBookingStore::new()),
            subscribers: Arc::new(MemorySubscriberStore::new()),
        });
    };

    let pool = workshop_db::create_pool(url)
        .await
        .wrap_err("Failed to connect to the database")?;
    workshop_db::schema::initialize_database(&pool).await?;

    info!(key = %config.bookings_key, "Using PostgreSQL record store");

    Ok(Stores {
        bookings: Arc::new(PgBookingStore::new(pool.clone(), config.bookings_key.clone())),
        subscribers: Arc::new(PgSubscriberStore::new(pool)),
    })
}

/// Installs the global tracing subscriber.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the application router with every route and the shared state.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot availability
        .merge(routes::slots::routes())
        // Booking list management
        .merge(routes::bookings::routes())
        // Telegram bot webhook
        .merge(routes::telegram::routes())
        // Subscriber broadcast
        .merge(routes::broadcast::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(ADMIN_HEADER),
        ])
        .allow_origin(origins)
}

/// Starts the API server and serves until `shutdown` resolves
///
/// In-flight requests finish before this returns. The state, and with it
/// the booking service's event sink, is dropped on return.
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use workshop_api::{config::ApiConfig, start_server, ApiState};
/// # async fn run(config: ApiConfig, state: ApiState) -> eyre::Result<()> {
/// start_server(config, Arc::new(state), async {
///     let _ = tokio::signal::ctrl_c().await;
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server<F>(config: config::ApiConfig, state: Arc<ApiState>, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) if !origins.is_empty() => app.layer(cors_layer(origins)),
        _ => app,
    };

    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
