//! # EPG API
//!
//! The API crate provides the web server of the EPG manager. It defines
//! JSON endpoints for managing channels, programs and schedules, and for
//! copying programs and schedules between channels.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Bind requests to the caller's identity and the store
//! - **Services**: The program and schedule copiers
//! - **Middleware**: Identity extraction and error mapping
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Storage goes through the
//! [`EpgStore`] trait, so the same router runs against PostgreSQL in
//! production and an in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Program and schedule copy operations
pub mod services;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use chrono_tz::Tz;
use epg_db::EpgStore;
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::{
    middleware::auth::{USER_EMAIL_HEADER, USER_ID_HEADER},
    services::{program_copier::ProgramCopier, schedule_copier::ScheduleCopier},
};

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono_tz::Tz;
/// use epg_api::ApiState;
/// use epg_db::MemoryStore;
///
/// let state = Arc::new(ApiState::new(Arc::new(MemoryStore::new()), Tz::UTC));
/// let app = epg_api::router(state);
/// ```
pub struct ApiState {
    /// Process-wide data-access handle
    pub store: Arc<dyn EpgStore>,
    /// Timezone defining the guide's calendar days
    pub timezone: Tz,
}

impl ApiState {
    pub fn new(store: Arc<dyn EpgStore>, timezone: Tz) -> Self {
        Self { store, timezone }
    }

    pub fn program_copier(&self) -> ProgramCopier {
        ProgramCopier::new(Arc::clone(&self.store))
    }

    pub fn schedule_copier(&self) -> ScheduleCopier {
        ScheduleCopier::new(Arc::clone(&self.store), self.timezone)
    }
}

/// Builds the application router with every route attached.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Channel management endpoints
        .merge(routes::channel::routes())
        // Program management and copy endpoints
        .merge(routes::program::routes())
        // Schedule management and copy endpoints
        .merge(routes::schedule::routes())
        // Attach shared state to all routes
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(USER_ID_HEADER),
            HeaderName::from_static(USER_EMAIL_HEADER),
        ])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and store
///
/// This function initializes logging, builds the router, applies the CORS,
/// tracing and timeout layers and serves HTTP until the process stops.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use std::sync::Arc;
/// use epg_api::config::ApiConfig;
/// use epg_db::{create_pool, PgStore};
///
/// let config = ApiConfig::from_env()?;
/// let pool = create_pool(&config.database_url, config.database_max_connections).await?;
/// epg_api::start_server(config, Arc::new(PgStore::new(pool))).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn EpgStore>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(store, config.timezone));
    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Add request tracing and timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(timezone = %config.timezone, "Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
