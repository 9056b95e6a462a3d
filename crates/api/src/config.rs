//! # API Configuration Module
//!
//! Loads the server configuration from environment variables, with defaults
//! where one makes sense.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (optional, in-memory stores when unset)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `ADMIN_PASSPHRASE`: Passphrase for the admin endpoints (required)
//! - `BOOKINGS_KEY`: Record store key of the booking list (default: "clay_workshop_bookings")
//!
//! The `TELEGRAM_*` variables are read by [`NotifierConfig::from_env`].

use eyre::{Result, WrapErr, bail};
use std::env;
use tracing::Level;
use workshop_db::repositories::booking::DEFAULT_BOOKINGS_KEY;
use workshop_notifier::config::NotifierConfig;

/// Configuration for the workshop API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use workshop_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL connection string; `None` keeps everything in memory
    pub database_url: Option<String>,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Plain passphrase for the admin endpoints. Hashed once at startup.
    pub admin_passphrase: String,

    /// Record store key the booking list lives under
    pub bookings_key: String,

    /// Telegram settings; `None` disables notifications and bot replies
    pub notifier: Option<NotifierConfig>,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `ADMIN_PASSPHRASE` is not set or blank
    /// - The API_PORT value cannot be parsed as a u16
    /// - `TELEGRAM_ADMIN_IDS` contains something other than chat ids
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Storage settings
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        let bookings_key = env::var("BOOKINGS_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BOOKINGS_KEY.to_string());

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Security settings
        let admin_passphrase = env::var("ADMIN_PASSPHRASE").unwrap_or_default();
        if admin_passphrase.trim().is_empty() {
            bail!("ADMIN_PASSPHRASE environment variable must be set");
        }

        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        let notifier = NotifierConfig::from_env()?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            admin_passphrase,
            bookings_key,
            notifier,
        })
    }

    /// Returns the server address, e.g. "127.0.0.1:8080"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Unknown levels fall back to `INFO`.
pub fn parse_log_level(raw: &str) -> Level {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
