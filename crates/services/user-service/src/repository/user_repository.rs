//! User repository backed by a pooled PostgreSQL connection.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, Statement, Value};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::infra::Database;
use common::{AppError, AppResult, DatabaseConfig};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1) AS user_exists";

/// User repository trait for dependency injection.
///
/// Every method is a single statement on a single pooled connection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user unless `user_id` is already taken.
    ///
    /// Returns `false` when the existing row was kept.
    async fn add(&self, user_id: i64, full_name: String) -> AppResult<bool>;

    /// List every stored user, in no particular order
    async fn all(&self) -> AppResult<Vec<User>>;

    /// Check whether a user with `user_id` is stored
    async fn exists(&self, user_id: i64) -> AppResult<bool>;

    /// Replace the full name of the matching user, returning rows affected
    async fn update(&self, user_id: i64, new_name: String) -> AppResult<u64>;

    /// Remove the matching user, returning rows affected
    async fn delete(&self, user_id: i64) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository owning the connection pool.
pub struct UserStore {
    db: Database,
}

impl UserStore {
    /// Create an unconnected store
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            db: Database::new(config),
        }
    }

    /// Create a store over an already established connection
    #[cfg(any(test, feature = "test-utils"))]
    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Initialize the connection pool
    pub async fn connect(&self, database_url: &str) -> AppResult<()> {
        self.db.connect(database_url).await
    }

    /// Create the `users` table if missing
    pub async fn ensure_schema(&self) -> AppResult<()> {
        self.db.ensure_schema().await
    }

    /// Release the pool; further operations fail
    pub async fn close(&self) {
        self.db.close().await
    }

    #[cfg(any(test, feature = "test-utils"))]
    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn add(&self, user_id: i64, full_name: String) -> AppResult<bool> {
        let active_model = ActiveModel {
            user_id: Set(user_id),
            full_name: Set(full_name),
            ..Default::default()
        };

        let inserted = self
            .db
            .run("add", move |conn| async move {
                UserEntity::insert(active_model)
                    .on_conflict(
                        OnConflict::column(user::Column::UserId)
                            .do_nothing()
                            .to_owned(),
                    )
                    .exec_without_returning(&*conn)
                    .await
            })
            .await?;

        Ok(inserted > 0)
    }

    async fn all(&self) -> AppResult<Vec<User>> {
        let models = self
            .db
            .run("all", |conn| async move { UserEntity::find().all(&*conn).await })
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn exists(&self, user_id: i64) -> AppResult<bool> {
        let row = self
            .db
            .run("exists", move |conn| async move {
                let statement = Statement::from_sql_and_values(
                    conn.get_database_backend(),
                    EXISTS_SQL,
                    [Value::from(user_id)],
                );
                conn.query_one(statement).await
            })
            .await?;

        match row {
            Some(row) => row
                .try_get::<bool>("", "user_exists")
                .map_err(AppError::Storage),
            None => Ok(false),
        }
    }

    async fn update(&self, user_id: i64, new_name: String) -> AppResult<u64> {
        let result = self
            .db
            .run("update", move |conn| async move {
                UserEntity::update_many()
                    .col_expr(user::Column::FullName, Expr::value(new_name))
                    .filter(user::Column::UserId.eq(user_id))
                    .exec(&*conn)
                    .await
            })
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, user_id: i64) -> AppResult<u64> {
        let result = self
            .db
            .run("delete", move |conn| async move {
                UserEntity::delete_many()
                    .filter(user::Column::UserId.eq(user_id))
                    .exec(&*conn)
                    .await
            })
            .await?;

        Ok(result.rows_affected)
    }
}
