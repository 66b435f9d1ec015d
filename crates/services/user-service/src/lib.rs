//! User Service Library
//!
//! Create/read/update/delete access to the `users` table over a pooled
//! PostgreSQL connection. [`repository::UserStore`] owns the pool and exposes
//! the operations; the `user-service` binary drives it from the command line.

pub mod cli;
pub mod commands;
pub mod config;
pub mod infra;
pub mod repository;

use common::AppResult;

use crate::cli::Command;
use crate::config::UserServiceConfig;
use crate::repository::UserStore;

/// Run one command against a freshly connected store.
///
/// The pool is closed before returning, whether or not the command succeeded.
pub async fn run_command(command: Command, config: UserServiceConfig) -> AppResult<String> {
    let store = UserStore::new(config.database.clone());
    store.connect(&config.database_url()).await?;

    let result = run_connected(&store, command).await;
    store.close().await;
    result
}

async fn run_connected(store: &UserStore, command: Command) -> AppResult<String> {
    store.ensure_schema().await?;
    commands::execute(command, store).await
}
