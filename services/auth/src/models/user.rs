//! Admin user model and related functionality

use chrono::{DateTime, Utc};
use common::identity::{Role, SessionIdentity};
use serde::{Deserialize, Serialize};

/// Admin user entity
///
/// Carries the password hash, so it never leaves the auth service; handlers
/// expose [`SessionIdentity`] instead.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminUser {
    /// Public identity fields, without the hash
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// New admin user creation payload, password already hashed
#[derive(Debug, Clone)]
pub struct NewAdminUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Login request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginCredentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
