use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::User;

/// Read-only access to provisioned users
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_name(&self, user_name: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>>;
}

/// Postgres-backed user store
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_name(&self, user_name: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, user_name, pass
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user by name: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, user_name, pass
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user {}: {:?}", user_id, e);
            AppError::Database(e)
        })
    }
}
