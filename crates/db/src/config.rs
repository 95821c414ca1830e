//! Database connection configuration.
//!
//! Resolved once at startup and passed explicitly to [`crate::create_pool`].

use std::fmt;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Default pool size when `DB_MAX_CONNECTIONS` is unset.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Host used inside a container when `DB_HOST_IN_DOCKER` is unset.
pub const DEFAULT_CONTAINER_HOST: &str = "db";

/// Errors raised while resolving the connection descriptor.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Resolved database configuration.
#[derive(Clone)]
pub struct DbConfig {
    pub connect_options: PgConnectOptions,
    pub max_connections: u32,
}

impl DbConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                  | Meaning                                     |
    /// |--------------------------|---------------------------------------------|
    /// | `DATABASE_URL`           | Full Postgres URL (takes precedence)        |
    /// | `DB_CONNECTION_STRING`   | Full Postgres URL (fallback name)           |
    /// | `DB_HOST`                | Host, required without a URL                |
    /// | `DB_PORT`                | Port, required without a URL                |
    /// | `DB_NAME`                | Database, required without a URL           |
    /// | `DB_USERNAME`            | User, required without a URL                |
    /// | `DB_PASSWORD`            | Password, required without a URL            |
    /// | `RUNNING_IN_CONTAINER`   | `true` swaps the host for `DB_HOST_IN_DOCKER` |
    /// | `DB_HOST_IN_DOCKER`      | Container host (default: `db`)              |
    /// | `SSL_MODE`               | sqlx SSL mode (default: `require`)          |
    /// | `DB_MAX_CONNECTIONS`     | Pool size (default: `20`)                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let connect_options = match get("DATABASE_URL").or_else(|| get("DB_CONNECTION_STRING")) {
            Some(url) => PgConnectOptions::from_str(&url).map_err(|e| ConfigError::Invalid {
                name: "DATABASE_URL",
                reason: e.to_string(),
            })?,
            None => Self::options_from_parts(&get)?,
        };

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                reason: format!("'{raw}' is not a positive integer"),
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            connect_options,
            max_connections,
        })
    }

    fn options_from_parts<G>(get: &G) -> Result<PgConnectOptions, ConfigError>
    where
        G: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let mut host = require("DB_HOST")?;
        let raw_port = require("DB_PORT")?;
        let database = require("DB_NAME")?;
        let username = require("DB_USERNAME")?;
        let password = require("DB_PASSWORD")?;

        let port: u16 = raw_port.trim().parse().map_err(|_| ConfigError::Invalid {
            name: "DB_PORT",
            reason: format!("'{raw_port}' is not a valid port"),
        })?;

        if get("RUNNING_IN_CONTAINER").is_some_and(|v| v.eq_ignore_ascii_case("true")) {
            host = get("DB_HOST_IN_DOCKER").unwrap_or_else(|| DEFAULT_CONTAINER_HOST.into());
        }

        let raw_ssl = get("SSL_MODE").unwrap_or_else(|| "require".into());
        let ssl_mode =
            PgSslMode::from_str(&raw_ssl.to_ascii_lowercase()).map_err(|e| ConfigError::Invalid {
                name: "SSL_MODE",
                reason: e.to_string(),
            })?;

        Ok(PgConnectOptions::new()
            .host(&host)
            .port(port)
            .database(&database)
            .username(&username)
            .password(&password)
            .ssl_mode(ssl_mode))
    }
}

impl fmt::Debug for DbConfig {
    // Credentials stay out of logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.connect_options.get_host())
            .field("port", &self.connect_options.get_port())
            .field("database", &self.connect_options.get_database())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}
