//! User service configuration.

use std::env;
use std::str::FromStr;

use common::{AppError, AppResult, ConnectionParts, DatabaseConfig};

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Parts of the PostgreSQL connection string
    pub connection: ConnectionParts,
    /// Pool options
    pub database: DatabaseConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| AppError::config(format!("{} is not set", key)))
        };

        let connection = ConnectionParts {
            host: required("DB_HOST")?,
            port: parse(&required("DB_PORT")?, "DB_PORT")?,
            user: required("DB_USER")?,
            password: required("DB_PASS")?,
            database: required("DB_NAME")?,
        };

        let defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            min_connections: optional(&lookup, "DB_POOL_MIN")?.unwrap_or(defaults.min_connections),
            max_connections: optional(&lookup, "DB_POOL_MAX")?.unwrap_or(defaults.max_connections),
            connect_timeout_secs: optional(&lookup, "DB_CONNECT_TIMEOUT_SECS")?
                .unwrap_or(defaults.connect_timeout_secs),
            statement_timeout_secs: optional(&lookup, "DB_STATEMENT_TIMEOUT_SECS")?,
            log_statements: optional(&lookup, "DB_LOG_STATEMENTS")?
                .unwrap_or(defaults.log_statements),
        };
        database.validate()?;

        Ok(Self {
            connection,
            database,
        })
    }

    /// Get the assembled connection URL.
    pub fn database_url(&self) -> String {
        self.connection.to_url()
    }
}

fn parse<T: FromStr>(value: &str, key: &str) -> AppResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::config(format!("{} has an invalid value: {:?}", key, value)))
}

fn optional<T, F>(lookup: &F, key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|value| parse(&value, key)).transpose()
}
