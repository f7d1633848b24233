//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the salon API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `ADMIN_KEY_HASH`: Argon2 PHC hash of the admin key (admin routes are refused without it)
//! - `SALON_TIMEZONE`: IANA timezone of the salon (default: "America/Sao_Paulo")
//! - `SALON_HOURS`: Comma-separated `HH:MM` start times offered each open day
//! - `SALON_SLOT_STEP_MINUTES`: Step used to expand appointments into slots (default: 30)
//! - `SALON_OPEN_DAYS`: Comma-separated weekdays the salon opens (default: "tue,wed,thu,fri,sat")

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use salon_core::availability::{BusinessHours, parse_hours, parse_weekdays};
use std::env;
use tracing::Level;

const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Configuration for the salon API server
///
/// This struct encapsulates all configuration options for the API server,
/// including networking, database connections, admin access and the salon's
/// business hours.
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use salon_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Argon2 hash of the admin key (optional)
    pub admin_key_hash: Option<String>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Timezone used to decide "today" and "now"
    pub timezone: Tz,

    /// Master catalog, slot step and open weekdays
    pub business_hours: BusinessHours,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - Any of the SALON_* values are malformed
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS")
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        // Security settings
        let admin_key_hash = lookup("ADMIN_KEY_HASH").filter(|hash| !hash.trim().is_empty());

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        // Salon settings
        let timezone_name = lookup("SALON_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|e| eyre!("Invalid SALON_TIMEZONE value {:?}: {}", timezone_name, e))?;

        let mut business_hours = BusinessHours::default();
        if let Some(hours) = lookup("SALON_HOURS") {
            business_hours.hours = parse_hours(&hours).wrap_err("Invalid SALON_HOURS value")?;
        }
        if let Some(step) = lookup("SALON_SLOT_STEP_MINUTES") {
            business_hours.step_minutes = step
                .trim()
                .parse()
                .wrap_err("Invalid SALON_SLOT_STEP_MINUTES value")?;
        }
        if let Some(days) = lookup("SALON_OPEN_DAYS") {
            business_hours.open_days =
                parse_weekdays(&days).wrap_err("Invalid SALON_OPEN_DAYS value")?;
        }
        business_hours
            .validate()
            .wrap_err("Invalid salon business hours")?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            admin_key_hash,
            request_timeout,
            timezone,
            business_hours,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Current wall-clock time in the salon's timezone.
pub fn salon_now(timezone: Tz) -> NaiveDateTime {
    chrono::Utc::now().with_timezone(&timezone).naive_local()
}
