//! Database connection pool and its lifecycle.

use std::future::Future;
use std::sync::Arc;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Schema,
};
use tokio::sync::RwLock;

use common::{AppError, AppResult, DatabaseConfig};

use crate::repository::entities::user;

/// Lifecycle of the pool: `Uninitialized -> Connected -> Closed`.
#[derive(Debug)]
pub enum PoolState {
    Uninitialized,
    Connected(Arc<DatabaseConnection>),
    Closed,
}

impl PoolState {
    pub fn name(&self) -> &'static str {
        match self {
            PoolState::Uninitialized => "uninitialized",
            PoolState::Connected(_) => "connected",
            PoolState::Closed => "closed",
        }
    }
}

/// Database wrapper owning the connection pool.
///
/// Data operations hold the state lock only long enough to clone the pool
/// handle; `connect` and `close` take it exclusively.
pub struct Database {
    config: DatabaseConfig,
    state: RwLock<PoolState>,
}

impl Database {
    /// Create an unconnected database handle.
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            state: RwLock::new(PoolState::Uninitialized),
        }
    }

    /// Wrap an already established connection (starts out connected).
    #[cfg(any(test, feature = "test-utils"))]
    pub fn from_connection(connection: DatabaseConnection, config: DatabaseConfig) -> Self {
        Self {
            config,
            state: RwLock::new(PoolState::Connected(Arc::new(connection))),
        }
    }

    /// Detach the connection, leaving the database closed.
    ///
    /// Returns `None` unless connected with no statement in flight.
    #[cfg(any(test, feature = "test-utils"))]
    pub async fn take_connection(&self) -> Option<DatabaseConnection> {
        let mut state = self.state.write().await;
        match std::mem::replace(&mut *state, PoolState::Closed) {
            PoolState::Connected(connection) => Arc::try_unwrap(connection).ok(),
            _ => None,
        }
    }

    /// Create the connection pool.
    ///
    /// Not idempotent: connecting a connected store builds a new pool and
    /// drops the previous handle without closing it. A closed store cannot be
    /// reconnected.
    pub async fn connect(&self, database_url: &str) -> AppResult<()> {
        self.config.validate()?;
        if matches!(*self.state.read().await, PoolState::Closed) {
            return Err(AppError::illegal_state("connect", "closed"));
        }

        let connection = SeaDatabase::connect(self.connect_options(database_url))
            .await
            .map_err(AppError::Connection)?;

        let mut state = self.state.write().await;
        if matches!(*state, PoolState::Closed) {
            drop(state);
            // Lost a race with close(); don't leave the fresh pool running.
            if let Err(e) = connection.close().await {
                tracing::warn!("Error while closing connection pool: {}", e);
            }
            return Err(AppError::illegal_state("connect", "closed"));
        }

        let previous = std::mem::replace(&mut *state, PoolState::Connected(Arc::new(connection)));
        if let PoolState::Connected(_) = previous {
            tracing::warn!("connect called on a connected store, previous pool handle dropped");
        }

        tracing::info!(
            min_connections = self.config.min_connections,
            max_connections = self.config.max_connections,
            "Database connection pool created"
        );
        Ok(())
    }

    /// Release all pooled connections. No-op unless connected.
    pub async fn close(&self) {
        let connection = {
            let mut state = self.state.write().await;
            if !matches!(*state, PoolState::Connected(_)) {
                return;
            }
            match std::mem::replace(&mut *state, PoolState::Closed) {
                PoolState::Connected(connection) => connection,
                _ => return,
            }
        };

        if let Err(e) = connection.close_by_ref().await {
            tracing::warn!("Error while closing connection pool: {}", e);
        }
        tracing::info!("Database connection pool closed");
    }

    /// Name of the current lifecycle state.
    #[cfg(any(test, feature = "test-utils"))]
    pub async fn state_name(&self) -> &'static str {
        self.state.read().await.name()
    }

    #[cfg(any(test, feature = "test-utils"))]
    pub async fn is_connected(&self) -> bool {
        matches!(*self.state.read().await, PoolState::Connected(_))
    }

    /// Get a handle to the pool, failing unless connected.
    pub async fn connection(
        &self,
        operation: &'static str,
    ) -> AppResult<Arc<DatabaseConnection>> {
        match &*self.state.read().await {
            PoolState::Connected(connection) => Ok(Arc::clone(connection)),
            other => Err(AppError::illegal_state(operation, other.name())),
        }
    }

    /// Create the `users` table if it does not exist.
    ///
    /// An existing table is left untouched, whatever its shape.
    pub async fn ensure_schema(&self) -> AppResult<()> {
        let connection = self.connection("ensure_schema").await?;
        let backend = connection.get_database_backend();
        let mut table = Schema::new(backend).create_table_from_entity(user::Entity);
        table.if_not_exists();
        let statement = backend.build(&table);

        self.timed(connection.execute(statement))
            .await?
            .map_err(AppError::Schema)?;

        tracing::info!("Table 'users' is ready");
        Ok(())
    }

    /// Run a single statement on a pooled connection.
    ///
    /// The connection is checked out for the duration of `statement` only and
    /// is returned to the pool on every exit path, including timeout.
    pub async fn run<T, F, Fut>(&self, operation: &'static str, statement: F) -> AppResult<T>
    where
        F: FnOnce(Arc<DatabaseConnection>) -> Fut,
        Fut: Future<Output = Result<T, DbErr>>,
    {
        let connection = self.connection(operation).await?;
        self.timed(statement(connection))
            .await?
            .map_err(AppError::Storage)
    }

    async fn timed<Fut: Future>(&self, fut: Fut) -> AppResult<Fut::Output> {
        match self.config.statement_timeout() {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| AppError::StatementTimeout(limit)),
            None => Ok(fut.await),
        }
    }

    fn connect_options(&self, database_url: &str) -> ConnectOptions {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options
            .min_connections(self.config.min_connections)
            .max_connections(self.config.max_connections)
            .connect_timeout(self.config.connect_timeout())
            .acquire_timeout(self.config.connect_timeout())
            .sqlx_logging(self.config.log_statements);
        options
    }
}
