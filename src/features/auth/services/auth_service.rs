use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dto::LoginFormDto;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::password::verify_password;
use crate::features::auth::repositories::UserStore;

/// Per-request credential check. No session is created: every page that
/// needs an identity must be reached with credentials again.
pub struct AuthService {
    store: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Resolve the submitted credentials to a user, or `None` when they do not match.
    ///
    /// The display name is the submitted username.
    pub async fn authenticate(&self, form: &LoginFormDto) -> Result<Option<AuthenticatedUser>> {
        let Some((username, password)) = form.credentials() else {
            return Ok(None);
        };

        let Some(user) = self.store.find_by_name(username).await? else {
            tracing::debug!("Login rejected: unknown user");
            return Ok(None);
        };

        let encoded = user.password_hash;
        let candidate = password.to_string();
        let verified = tokio::task::spawn_blocking(move || verify_password(&encoded, &candidate))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?;

        match verified {
            Ok(true) => Ok(Some(AuthenticatedUser {
                user_id: user.user_id,
                user_name: username.to_string(),
            })),
            Ok(false) => {
                tracing::debug!("Login rejected: wrong password for user {}", user.user_id);
                Ok(None)
            }
            Err(e) => {
                tracing::error!("Stored password for user {} is not a valid hash: {}", user.user_id, e);
                Ok(None)
            }
        }
    }

    /// Look up a user by id for the `/user/{id}` pages
    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<AuthenticatedUser>> {
        let user = self.store.find_by_id(user_id).await?;

        Ok(user.map(|u| AuthenticatedUser {
            user_id: u.user_id,
            user_name: u.user_name,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryUserStore;

    fn login(username: &str, password: &str) -> LoginFormDto {
        LoginFormDto {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn service() -> AuthService {
        let store = InMemoryUserStore::default();
        store.add_user(4, "maria", "correct horse");
        store.add_plaintext_user(9, "legacy", "plain");
        AuthService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let user = service()
            .authenticate(&login("maria", "correct horse"))
            .await
            .unwrap();

        assert_eq!(
            user,
            Some(AuthenticatedUser {
                user_id: 4,
                user_name: "maria".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let user = service()
            .authenticate(&login("maria", "battery staple"))
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let user = service()
            .authenticate(&login("nobody", "correct horse"))
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_missing_fields() {
        let user = service()
            .authenticate(&LoginFormDto::default())
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_plaintext_stored_password_never_matches() {
        let user = service()
            .authenticate(&login("legacy", "plain"))
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let service = service();

        let user = service.find_by_id(4).await.unwrap().unwrap();
        assert_eq!(user.user_name, "maria");

        assert!(service.find_by_id(404).await.unwrap().is_none());
    }
}
