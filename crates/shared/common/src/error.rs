//! Unified error handling for the user store.
//!
//! Every failure is surfaced to the caller as a typed [`AppError`]; the store
//! never retries or recovers locally.

use std::time::Duration;

use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Pool lifecycle
    #[cfg(feature = "database")]
    #[error("Failed to establish connection pool: {0}")]
    Connection(#[source] sea_orm::DbErr),

    #[error("Cannot {operation}: store is {state}")]
    IllegalState {
        operation: &'static str,
        state: &'static str,
    },

    // Statement execution
    #[cfg(feature = "database")]
    #[error("Schema error: {0}")]
    Schema(#[source] sea_orm::DbErr),

    #[cfg(feature = "database")]
    #[error("Storage error: {0}")]
    Storage(#[source] sea_orm::DbErr),

    #[error("Statement timed out after {0:?}")]
    StatementTimeout(Duration),

    // Configuration
    #[error("Configuration error: {0}")]
    Config(String),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get a stable error code
    pub fn code(&self) -> &'static str {
        match self {
            #[cfg(feature = "database")]
            AppError::Connection(_) => "CONNECTION_ERROR",
            AppError::IllegalState { .. } => "ILLEGAL_STATE",
            #[cfg(feature = "database")]
            AppError::Schema(_) => "SCHEMA_ERROR",
            #[cfg(feature = "database")]
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::StatementTimeout(_) => "STATEMENT_TIMEOUT",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error came from executing a statement on a live pool.
    ///
    /// Timeouts count as storage failures.
    pub fn is_storage(&self) -> bool {
        match self {
            #[cfg(feature = "database")]
            AppError::Storage(_) => true,
            AppError::StatementTimeout(_) => true,
            _ => false,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn illegal_state(operation: &'static str, state: &'static str) -> Self {
        AppError::IllegalState { operation, state }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
