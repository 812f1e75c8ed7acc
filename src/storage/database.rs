//! Database connection bootstrap.

use std::time::Duration;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::{DatabaseConfig, Environment};

/// Lifecycle-scoped database handle.
///
/// Connected once at startup. A connect failure is fatal in development
/// and logged-and-ignored in production, where the service keeps running
/// disconnected.
#[derive(Debug, Clone)]
pub struct Database {
    pool: Option<SqlitePool>,
}

impl Database {
    pub async fn connect(
        config: &DatabaseConfig,
        environment: Environment,
    ) -> anyhow::Result<Self> {
        let Some(url) = config.url.as_deref().filter(|u| !u.is_empty()) else {
            tracing::warn!("No database URL configured, continuing without a database");
            return Ok(Self { pool: None });
        };

        tracing::info!("Attempting to connect to database");

        let options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs));

        match options.connect(url).await {
            Ok(pool) => {
                tracing::info!("Database connected");
                Ok(Self { pool: Some(pool) })
            }
            Err(e) if environment.is_development() => {
                tracing::error!(error = %e, "Failed to connect to database");
                Err(anyhow::anyhow!("Database connection error: {}", e))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to database");
                tracing::warn!("Continuing without database connection in production mode");
                Ok(Self { pool: None })
            }
        }
    }

    /// Connectivity string for the health endpoint.
    pub fn status(&self) -> &'static str {
        if self.pool.is_some() {
            "connected"
        } else {
            "disconnected"
        }
    }

    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            tracing::info!("Database connection closed");
        }
    }
}
