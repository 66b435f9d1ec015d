//! Command implementations.
//!
//! Commands only see the [`UserRepository`] trait; connecting and closing the
//! pool is left to the caller.

use common::{AppError, AppResult};
use domain::User;

use crate::cli::Command;
use crate::repository::UserRepository;

/// User added by the `demo` command
pub const DEMO_USER_ID: i64 = 12345;
pub const DEMO_FULL_NAME: &str = "John Doe";

/// Execute a command, returning the text to print.
pub async fn execute(command: Command, repo: &dyn UserRepository) -> AppResult<String> {
    match command {
        Command::Init => Ok("Table 'users' is ready".to_string()),
        Command::Demo => {
            repo.add(DEMO_USER_ID, DEMO_FULL_NAME.to_string()).await?;
            let users = repo.all().await?;
            Ok(format!("Users:\n{}", render(&users)))
        }
        Command::Add { user_id, full_name } => {
            if repo.add(user_id, full_name).await? {
                Ok(format!("Added user {}", user_id))
            } else {
                Ok(format!("User {} already exists, left unchanged", user_id))
            }
        }
        Command::List { json: true } => {
            let users = repo.all().await?;
            serde_json::to_string_pretty(&users).map_err(|e| AppError::internal(e.to_string()))
        }
        Command::List { json: false } => Ok(render(&repo.all().await?)),
        Command::Exists { user_id } => Ok(repo.exists(user_id).await?.to_string()),
        Command::Update { user_id, new_name } => {
            Ok(repo.update(user_id, new_name).await?.to_string())
        }
        Command::Delete { user_id } => Ok(repo.delete(user_id).await?.to_string()),
    }
}

fn render(users: &[User]) -> String {
    if users.is_empty() {
        return "(no users)".to_string();
    }
    users
        .iter()
        .map(User::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
