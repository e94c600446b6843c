use serde::Serialize;
use sqlx::FromRow;

/// Database model for user
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i32,
    pub user_name: String,
    /// Argon2 encoded hash
    #[sqlx(rename = "pass")]
    pub password_hash: String,
}

/// Identity established for the current request only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub user_name: String,
}
