//! # Tuition API
//!
//! Web server for the tuition centre scheduling service. It exposes teachers,
//! classes and their weekly slots, and refuses to save a class schedule that
//! double-books a teacher or a location.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate requests, run the conflict check, call the store
//! - **Middleware**: Error-to-response mapping
//! - **Config**: Environment configuration
//!
//! Handlers reach storage only through `TuitionStore`, so tests can swap in
//! a mock.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{Router, http::HeaderValue};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use tuition_core::conflict::ConflictChecker;
use tuition_db::{DbPool, PgTuitionStore, TuitionStore};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Record store for teachers, classes and slots
    pub store: Arc<dyn TuitionStore>,
    /// Policy used when checking proposed schedules
    pub checker: ConflictChecker,
}

impl ApiState {
    pub fn new(store: Arc<dyn TuitionStore>, checker: ConflictChecker) -> Self {
        Self { store, checker }
    }
}

/// Builds the application router with every route and the shared state attached.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Teacher endpoints
        .merge(routes::teacher::routes())
        // Class and schedule endpoints
        .merge(routes::class::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// Initialises logging, wraps the router in tracing, timeout and optional
/// CORS layers, then serves until the process stops.
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = Arc::new(PgTuitionStore::new(db_pool));
    let state = Arc::new(ApiState::new(store, config.conflict_checker()));

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_origin(origins)
        .allow_credentials(true))
}
