//! In-memory admin user store for tests

use async_trait::async_trait;
use chrono::Utc;
use common::error::DatabaseResult;
use common::identity::Role;
use tokio::sync::Mutex;

use super::AdminUserStore;
use crate::models::{AdminUser, NewAdminUser};
use crate::password::hash_password;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<AdminUser>>,
}

impl MemoryUserStore {
    /// Store holding one user with the given plaintext password
    pub async fn with_user(username: &str, password: &str, role: Role) -> Self {
        let store = Self::default();
        store
            .create(&NewAdminUser {
                username: username.to_string(),
                email: format!("{}@clinic.test", username),
                password_hash: hash_password(password).unwrap(),
                role,
            })
            .await
            .unwrap();
        store
    }
}

#[async_trait]
impl AdminUserStore for MemoryUserStore {
    async fn find_active_by_username(&self, username: &str) -> DatabaseResult<Option<AdminUser>> {
        let users = self.users.lock().await;
        Ok(users
            .iter()
            .find(|u| u.username == username && u.is_active)
            .cloned())
    }

    async fn create(&self, new_user: &NewAdminUser) -> DatabaseResult<AdminUser> {
        let mut users = self.users.lock().await;
        let now = Utc::now();
        let user = AdminUser {
            id: users.len() as i64 + 1,
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            role: new_user.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn count(&self) -> DatabaseResult<i64> {
        Ok(self.users.lock().await.len() as i64)
    }

    async fn update_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> DatabaseResult<bool> {
        let mut users = self.users.lock().await;
        match users.iter_mut().find(|u| u.username == username) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_active(&self, username: &str, active: bool) -> DatabaseResult<bool> {
        let mut users = self.users.lock().await;
        match users.iter_mut().find(|u| u.username == username) {
            Some(user) => {
                user.is_active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
