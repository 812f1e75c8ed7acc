//! Configuration module for the DA Admin backend.
//!
//! Loads configuration from YAML files and environment variables, then
//! applies the legacy single-variable overrides older deployments rely on
//! (PORT, DATABASE_URL, FRONTEND_URL, NODE_ENV).

use config::{Config as ConfigLoader, ConfigError, Environment as EnvSource, File};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub environment: Environment,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database configuration.
///
/// Pool defaults: up to ten connections, ten-second acquire timeout.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string. Absent means the service runs without a database.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsConfig {
    /// Optional extra allowed origin for the deployed frontend.
    #[serde(default)]
    pub frontend_url: Option<String>,
}

/// Environment mode. Anything other than `production` counts as
/// development, matching NODE_ENV conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (PORT, DATABASE_URL, ...)
    /// 2. Environment variables (DA_ADMIN__*)
    /// 3. config/local.yaml (if exists)
    /// 4. config/default.yaml
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(false))
            // Layer on local overrides
            .add_source(File::with_name("config/local").required(false))
            // Layer on environment variables with DA_ADMIN prefix
            .add_source(
                EnvSource::with_prefix("DA_ADMIN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = config.try_deserialize()?;
        config.apply_legacy_env();
        Ok(config)
    }

    /// Single-variable overrides kept for backward compatibility with
    /// older deployment environments. Two names are accepted for the
    /// database connection string.
    fn apply_legacy_env(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(url) = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("DA_ADMIN_DATABASE_URL"))
            .ok()
            .filter(|u| !u.is_empty())
        {
            self.database.url = Some(url);
        }
        if let Some(origin) = std::env::var("FRONTEND_URL").ok().filter(|o| !o.is_empty()) {
            self.cors.frontend_url = Some(origin);
        }
        if let Some(mode) = std::env::var("APP_ENV")
            .or_else(|_| std::env::var("NODE_ENV"))
            .ok()
            .filter(|m| !m.is_empty())
        {
            self.environment = Environment::from_name(&mode);
        }
    }
}
