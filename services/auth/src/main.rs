use anyhow::Result;
use clap::Parser;
use tracing::info;

mod authenticator;
mod cli;
mod config;
mod middleware;
mod models;
mod password;
mod rate_limiter;
mod repositories;
mod routes;
mod validation;

use std::sync::Arc;

use common::cookie::SessionCookieConfig;
use common::database;
use common::guard::SessionGuard;
use common::jwt::{JwtConfig, TokenService};
use tokio::net::TcpListener;

use crate::authenticator::Authenticator;
use crate::cli::{Cli, Command};
use crate::rate_limiter::{RateLimiter, RateLimiterConfig};
use crate::repositories::{AdminUserStore, UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Authenticator,
    pub guard: SessionGuard,
    pub cookie_config: SessionCookieConfig,
    pub rate_limiter: RateLimiter,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    if !database::health_check(&pool).await? {
        anyhow::bail!("Failed to connect to database");
    }
    database::run_migrations(&pool).await?;

    let users: Arc<dyn AdminUserStore> = Arc::new(UserRepository::new(pool));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(users).await,
        Command::SeedAdmin {
            username,
            password,
            email,
            role,
        } => cli::seed_admin(users.as_ref(), &username, &password, email.as_deref(), role).await,
        Command::SetPassword { username, password } => {
            cli::set_password(users.as_ref(), &username, &password).await
        }
        Command::SetActive { username, active } => {
            cli::set_active(users.as_ref(), &username, active).await
        }
    }
}

async fn serve(users: Arc<dyn AdminUserStore>) -> Result<()> {
    info!("Starting authentication service");

    let server_config = config::ServerConfig::from_env()?;
    cli::bootstrap_admin(users.as_ref(), &server_config).await?;

    let tokens = TokenService::new(JwtConfig::from_env()?)?;

    let app_state = AppState {
        authenticator: Authenticator::new(users)?,
        guard: SessionGuard::new(tokens),
        cookie_config: SessionCookieConfig::from_env()?,
        rate_limiter: RateLimiter::new(RateLimiterConfig::from_env()?),
    };

    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&server_config.bind_address).await?;
    info!(
        "Authentication service listening on {}",
        server_config.bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
