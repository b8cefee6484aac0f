//! Admin user repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use common::identity::Role;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use crate::models::{AdminUser, NewAdminUser};

/// Storage of admin accounts
///
/// Handlers and the authenticator depend on this trait rather than on the
/// pool so tests can run against an in-memory store.
#[async_trait]
pub trait AdminUserStore: Send + Sync {
    /// Find an active user by exact, case-sensitive username
    async fn find_active_by_username(&self, username: &str) -> DatabaseResult<Option<AdminUser>>;

    /// Insert a new user
    async fn create(&self, new_user: &NewAdminUser) -> DatabaseResult<AdminUser>;

    /// Number of stored users, active or not
    async fn count(&self) -> DatabaseResult<i64>;

    /// Replace a user's password hash; false when the username is unknown
    async fn update_password_hash(&self, username: &str, password_hash: &str)
    -> DatabaseResult<bool>;

    /// Toggle a user's active flag; false when the username is unknown
    async fn set_active(&self, username: &str, active: bool) -> DatabaseResult<bool>;
}

/// PostgreSQL-backed admin user repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> DatabaseResult<AdminUser> {
        let role: String = row.get("role");
        let role = role.parse::<Role>().map_err(DatabaseError::Decode)?;

        Ok(AdminUser {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            role,
            is_active: row.get("is_active"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl AdminUserStore for UserRepository {
    async fn find_active_by_username(&self, username: &str) -> DatabaseResult<Option<AdminUser>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, role, is_active, created_at, updated_at
            FROM admin_users
            WHERE username = $1 AND is_active = TRUE
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn create(&self, new_user: &NewAdminUser) -> DatabaseResult<AdminUser> {
        info!("Creating admin user: {}", new_user.username);

        let row = sqlx::query(
            r#"
            INSERT INTO admin_users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, role, is_active, created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Self::map_row(&row)
    }

    async fn count(&self) -> DatabaseResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn update_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> DatabaseResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE admin_users
            SET password_hash = $2, updated_at = NOW()
            WHERE username = $1
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_active(&self, username: &str, active: bool) -> DatabaseResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE admin_users
            SET is_active = $2, updated_at = NOW()
            WHERE username = $1
            "#,
        )
        .bind(username)
        .bind(active)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
