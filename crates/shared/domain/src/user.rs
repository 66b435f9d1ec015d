//! User record stored in the `users` table.

use serde::{Deserialize, Serialize};

/// User domain entity.
///
/// `user_id` is the externally supplied business identifier and is unique
/// across all records. The table's surrogate key never leaves the
/// persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub full_name: String,
}

impl User {
    /// Create a new user record
    pub fn new(user_id: i64, full_name: impl Into<String>) -> Self {
        Self {
            user_id,
            full_name: full_name.into(),
        }
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.user_id, self.full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_shows_id_and_name() {
        let user = User::new(12345, "John Doe");
        assert_eq!(user.to_string(), "12345: John Doe");
    }

    #[test]
    fn test_serializes_as_id_name_pair() {
        let user = User::new(12345, "John Doe");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json, serde_json::json!({ "user_id": 12345, "full_name": "John Doe" }));
    }
}
