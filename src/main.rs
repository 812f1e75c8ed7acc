//! DA Admin Backend API
//!
//! A mock admin backend exposing REST endpoints for users, auth, and
//! dashboard data. All route handlers return canned or trivially derived
//! payloads; the database handle is established at startup but never
//! consulted by the routes.

use std::time::Instant;

use tokio::net::TcpListener;

mod api;
mod config;
mod cors;
mod error;
mod extract;
mod logging;
mod storage;

use crate::api::build_router;
use crate::config::Config;
use crate::cors::CorsPolicy;
use crate::storage::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process start time, for the health endpoint's uptime.
    pub started_at: Instant,
    /// Environment mode (development/production).
    pub environment: config::Environment,
    /// Database handle. Inert: connected at startup, reported by the
    /// health endpoint, never queried by route handlers.
    pub database: Database,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    // This is optional and won't fail if .env doesn't exist
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    // Initialize logging
    logging::init();

    tracing::info!("Starting DA Admin Backend API v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        environment = %config.environment,
        database_configured = %config.database.url.is_some(),
        "Configuration loaded"
    );

    // Connect to the database. Failure is fatal in development; in
    // production the service continues without a connection.
    let database = Database::connect(&config.database, config.environment).await?;

    // The CORS policy is fixed at startup: a static allowlist plus the
    // optional configured frontend origin.
    let cors_policy =
        CorsPolicy::from_config(config.environment, config.cors.frontend_url.as_deref());

    tracing::info!(
        environment = %config.environment,
        allowed_origins = ?cors_policy.allowed_origins(),
        "CORS policy initialized"
    );

    // Build application state
    let state = AppState {
        started_at: Instant::now(),
        environment: config.environment,
        database: database.clone(),
    };

    // Build router
    let app = build_router(state, cors_policy);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Teardown is bound to process stop: close the pool once the serve
    // loop has drained.
    database.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolve when the process receives ctrl-c.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown signal handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
