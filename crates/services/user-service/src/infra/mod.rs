//! Infrastructure layer - database connection pool.

mod db;

pub use db::{Database, PoolState};
