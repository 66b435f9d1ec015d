//! Shared configuration structures.

use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Minimum number of live connections kept by the pool
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Maximum number of live connections in the pool
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default timeout for establishing or acquiring a connection
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// The five values a PostgreSQL connection string is assembled from.
#[derive(Clone)]
pub struct ConnectionParts {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl std::fmt::Debug for ConnectionParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionParts")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

impl ConnectionParts {
    /// Assemble `postgresql://<user>:<password>@<host>:<port>/<database>`.
    ///
    /// Values are inserted verbatim, without percent-encoding.
    pub fn to_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// Connection pool options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub min_connections: u32,
    pub max_connections: u32,
    /// Applies to both establishing and acquiring a connection
    pub connect_timeout_secs: u64,
    /// Per-statement timeout; `None` leaves statements unbounded
    pub statement_timeout_secs: Option<u64>,
    /// Emit every executed statement through the driver's logger
    pub log_statements: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            min_connections: DEFAULT_MIN_CONNECTIONS,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            statement_timeout_secs: None,
            log_statements: false,
        }
    }
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn statement_timeout(&self) -> Option<Duration> {
        self.statement_timeout_secs.map(Duration::from_secs)
    }

    /// Check that the pool bounds describe a usable pool.
    pub fn validate(&self) -> AppResult<()> {
        if self.max_connections == 0 {
            return Err(AppError::config("max_connections must be at least 1"));
        }
        if self.min_connections > self.max_connections {
            return Err(AppError::config(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        Ok(())
    }
}
