//! Common library for the dental clinic back office
//!
//! This crate provides functionality shared by the auth and API services:
//! database connectivity and migrations, error types, environment
//! configuration, and the session token, cookie and guard used to protect the
//! admin area.

pub mod cookie;
pub mod database;
pub mod error;
pub mod guard;
pub mod identity;
pub mod jwt;
pub mod settings;

/// Example usage of the database and session modules
///
/// ```rust,no_run
/// use common::database::{DatabaseConfig, init_pool, run_migrations};
/// use common::jwt::{JwtConfig, TokenService};
/// use common::guard::SessionGuard;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = init_pool(&DatabaseConfig::from_env()?).await?;
///     run_migrations(&pool).await?;
///     let guard = SessionGuard::new(TokenService::new(JwtConfig::from_env()?)?);
///     println!("Login page: {}", guard.login_path());
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
