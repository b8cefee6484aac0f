//! Credential authenticator
//!
//! Checks a username/password pair against the stored Argon2 hashes. Unknown
//! users, inactive users and wrong passwords all produce the same
//! `InvalidCredentials` failure, and every attempt costs one Argon2
//! verification so response timing does not reveal whether a username exists.

use std::sync::Arc;

use common::error::DatabaseError;
use common::identity::SessionIdentity;
use thiserror::Error;
use tracing::{error, warn};

use crate::password::{hash_password, verify_password};
use crate::repositories::AdminUserStore;

/// Reasons an authentication attempt fails
#[derive(Error, Debug)]
pub enum AuthenticationError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential lookup failed: {0}")]
    Storage(#[from] DatabaseError),

    #[error("Password verification failed: {0}")]
    Internal(String),
}

#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn AdminUserStore>,
    // Verified against when the username is unknown.
    dummy_hash: Arc<str>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn AdminUserStore>) -> anyhow::Result<Self> {
        let dummy_hash = hash_password("unknown-user-placeholder-password")
            .map_err(|e| anyhow::anyhow!("Failed to prepare dummy hash: {}", e))?;

        Ok(Self {
            users,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Authenticate a username/password pair
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionIdentity, AuthenticationError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthenticationError::MissingCredentials);
        }

        let user = self.users.find_active_by_username(username).await?;

        let stored_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.to_string(),
        };

        let password = password.to_string();
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AuthenticationError::Internal(e.to_string()))?;

        let matches = match verified {
            Ok(matches) => matches,
            Err(e) => {
                error!("Stored password hash for '{}' is unreadable: {}", username, e);
                false
            }
        };

        match user {
            Some(user) if matches => Ok(user.identity()),
            _ => {
                warn!("Rejected login for user: {}", username);
                Err(AuthenticationError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::MemoryUserStore;
    use common::identity::Role;

    async fn authenticator() -> (Authenticator, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::with_user("admin", "admin123", Role::Admin).await);
        let authenticator = Authenticator::new(store.clone()).unwrap();
        (authenticator, store)
    }

    #[tokio::test]
    async fn test_valid_credentials_return_identity() {
        let (authenticator, _) = authenticator().await;
        let identity = authenticator.authenticate("admin", "admin123").await.unwrap();
        assert_eq!(identity.username, "admin");
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.id, 1);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_fail_identically() {
        let (authenticator, _) = authenticator().await;

        let wrong = authenticator.authenticate("admin", "wrongpass").await.unwrap_err();
        let unknown = authenticator.authenticate("ghost", "admin123").await.unwrap_err();

        assert!(matches!(wrong, AuthenticationError::InvalidCredentials));
        assert!(matches!(unknown, AuthenticationError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_username_match_is_case_sensitive() {
        let (authenticator, _) = authenticator().await;
        let result = authenticator.authenticate("Admin", "admin123").await;
        assert!(matches!(result, Err(AuthenticationError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_inactive_user_cannot_authenticate() {
        let (authenticator, store) = authenticator().await;
        assert!(store.set_active("admin", false).await.unwrap());

        let result = authenticator.authenticate("admin", "admin123").await;
        assert!(matches!(result, Err(AuthenticationError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_empty_fields_are_rejected_before_lookup() {
        let (authenticator, _) = authenticator().await;
        assert!(matches!(
            authenticator.authenticate("", "admin123").await,
            Err(AuthenticationError::MissingCredentials)
        ));
        assert!(matches!(
            authenticator.authenticate("admin", "").await,
            Err(AuthenticationError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn test_rotated_password_takes_effect() {
        let (authenticator, store) = authenticator().await;
        let new_hash = hash_password("n3w-Secret!").unwrap();
        assert!(store.update_password_hash("admin", &new_hash).await.unwrap());

        assert!(authenticator.authenticate("admin", "admin123").await.is_err());
        assert!(authenticator.authenticate("admin", "n3w-Secret!").await.is_ok());
    }
}
