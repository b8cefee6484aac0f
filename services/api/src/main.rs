use anyhow::Result;
use tracing::info;

mod error;
mod middleware;
mod models;
mod repositories;
mod routes;
mod settings;
mod state;
mod uploads;
mod validation;

use common::database::{self, DatabaseConfig, init_pool};
use common::guard::SessionGuard;
use common::jwt::{JwtConfig, TokenService};
use tokio::net::TcpListener;

pub use crate::state::AppState;
use crate::settings::{AppointmentConfig, ServerConfig, UploadConfig};
use crate::uploads::UploadStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }
    database::run_migrations(&pool).await?;

    let server_config = ServerConfig::from_env()?;
    let upload_config = UploadConfig::from_env()?;
    let appointment_config = AppointmentConfig::from_env()?;

    let guard = SessionGuard::new(TokenService::new(JwtConfig::from_env()?)?);
    let uploads = UploadStore::new(&upload_config);
    tokio::fs::create_dir_all(uploads.dir()).await?;

    info!(
        "Appointment status policy: {:?}, uploads in {}",
        appointment_config.status_policy,
        uploads.dir().display()
    );

    let app_state = AppState::new(pool, uploads, guard, appointment_config.status_policy);

    // Start the web server
    let app = routes::create_router(
        app_state,
        &server_config.admin_pages_dir,
        upload_config.max_bytes,
    );

    let listener = TcpListener::bind(&server_config.bind_address).await?;
    info!("API service listening on {}", server_config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
