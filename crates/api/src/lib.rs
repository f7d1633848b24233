//! # Salon API
//!
//! The API crate provides the web server for the salon booking service.
//! It exposes the service catalog, announcements, slot availability and
//! booking to clients, and an admin surface for managing services,
//! appointments, blocked slots and announcements.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Provide cross-cutting concerns like admin authentication and error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use eyre::{Result, eyre};
use salon_core::availability::BusinessHours;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState::new(db_pool, &config));
/// let app = build_router(state);
/// ```
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Master catalog, slot step and open weekdays
    pub business_hours: BusinessHours,
    /// Salon timezone for "today" and "now"
    pub timezone: Tz,
    /// Argon2 hash of the admin key; admin routes are refused when unset
    pub admin_key_hash: Option<String>,
}

impl ApiState {
    pub fn new(db_pool: PgPool, config: &config::ApiConfig) -> Self {
        Self {
            db_pool,
            business_hours: config.business_hours.clone(),
            timezone: config.timezone,
            admin_key_hash: config.admin_key_hash.clone(),
        }
    }

    /// Current local time at the salon.
    pub fn now(&self) -> NaiveDateTime {
        config::salon_now(self.timezone)
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Public catalog, announcements and availability
        .merge(routes::catalog::routes())
        // Client booking endpoints
        .merge(routes::appointment::routes())
        // Admin endpoints, behind the admin key
        .merge(routes::admin::routes(state.clone()))
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// This function initializes logging, configures routes, and starts the HTTP server.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if config.admin_key_hash.is_none() {
        tracing::warn!("ADMIN_KEY_HASH is not set; admin routes will refuse every request");
    }

    // Create shared state with dependencies
    let state = Arc::new(ApiState::new(db_pool, &config));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse()
                    .map_err(|e| eyre!("Invalid CORS origin {:?}: {}", origin, e))
            })
            .collect::<Result<Vec<axum::http::HeaderValue>>>()?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
                axum::http::HeaderName::from_static(middleware::auth::ADMIN_KEY_HEADER),
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request tracing and timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .layer(tower_http::timeout::TimeoutLayer::new(
                std::time::Duration::from_secs(config.request_timeout),
            )),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
