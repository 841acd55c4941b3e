//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `DOCSHELF__`-prefixed environment variables. A handful of
//! conventional deployment variables (`SECRET_KEY`, `DEBUG`, ...) are applied
//! on top.

pub mod app;
pub mod auth;
pub mod cache;
pub mod documents;
pub mod logging;
pub mod rate_limit;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::cache::CacheConfig;
use self::documents::{DocumentsConfig, FrontendConfig};
use self::logging::LoggingConfig;
use self::rate_limit::RateLimitConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Cache provider settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Rate limiting for credential endpoints.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Document API settings.
    #[serde(default)]
    pub documents: DocumentsConfig,
    /// Static frontend settings.
    #[serde(default)]
    pub frontend: FrontendConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL.
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Reads `.env` if present, merges `config/default.toml`, the
    /// `config/{env}.toml` overlay and `DOCSHELF__*` variables, then applies
    /// the well-known deployment variables and validates the result.
    pub fn load(env: &str) -> Result<Self, AppError> {
        // A missing .env file is normal outside development.
        let _ = dotenv::dotenv();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("DOCSHELF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let mut config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `SECRET_KEY`, `DEBUG`, `ALLOWED_HOSTS`, `CSRF_TRUSTED_ORIGINS`
    /// and `DATABASE_URL` from the given lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup("SECRET_KEY") {
            self.auth.secret_key = secret;
        }
        if let Some(debug) = lookup("DEBUG") {
            self.server.debug = parse_flag(&debug);
        }
        if let Some(hosts) = lookup("ALLOWED_HOSTS") {
            self.server.allowed_hosts = split_list(&hosts);
        }
        if let Some(origins) = lookup("CSRF_TRUSTED_ORIGINS") {
            self.server.cors.trusted_origins = split_list(&origins);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
    }

    /// Reject configurations the server cannot safely start with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.secret_key.trim().is_empty() {
            return Err(AppError::configuration(
                "SECRET_KEY (auth.secret_key) must be set",
            ));
        }
        if self.auth.password_min_length == 0 {
            return Err(AppError::configuration(
                "auth.password_min_length must be at least 1",
            ));
        }
        if self.rate_limit.window_seconds == 0 || self.rate_limit.requests_per_window == 0 {
            return Err(AppError::configuration(
                "rate_limit.window_seconds and rate_limit.requests_per_window must be positive",
            ));
        }
        match self.cache.provider.as_str() {
            "memory" | "redis" => {}
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown cache provider '{other}'"
                )));
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_database_url() -> String {
    "sqlite://docshelf.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}
