//! Admin account commands
//!
//! Accounts are never created over HTTP. These commands run against the same
//! store the service uses and are wired to `clap` subcommands in `main`.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use common::identity::Role;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::models::NewAdminUser;
use crate::password::hash_password;
use crate::repositories::AdminUserStore;
use crate::validation::{validate_email, validate_password, validate_username};

#[derive(Parser, Debug)]
#[command(name = "auth", about = "Dental clinic admin authentication service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service (default)
    Serve,

    /// Create an admin account
    SeedAdmin {
        #[arg(long)]
        username: String,
        #[arg(long, env = "SEED_ADMIN_PASSWORD")]
        password: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, default_value = "admin")]
        role: Role,
    },

    /// Replace an account's password
    SetPassword {
        #[arg(long)]
        username: String,
        #[arg(long, env = "SET_PASSWORD_PASSWORD")]
        password: String,
    },

    /// Activate or deactivate an account
    SetActive {
        #[arg(long)]
        username: String,
        #[arg(long, action = clap::ArgAction::Set)]
        active: bool,
    },
}

pub async fn seed_admin(
    users: &dyn AdminUserStore,
    username: &str,
    password: &str,
    email: Option<&str>,
    role: Role,
) -> Result<()> {
    validate_username(username).map_err(anyhow::Error::msg)?;
    validate_password(password).map_err(anyhow::Error::msg)?;

    let email = match email {
        Some(email) => email.to_string(),
        None => format!("{}@clinic.local", username),
    };
    validate_email(&email).map_err(anyhow::Error::msg)?;

    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let user = users
        .create(&NewAdminUser {
            username: username.to_string(),
            email,
            password_hash,
            role,
        })
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                anyhow::anyhow!("User '{}' already exists", username)
            } else {
                anyhow::Error::new(e)
            }
        })?;

    info!("Created {} account '{}' (id {})", user.role, user.username, user.id);
    Ok(())
}

pub async fn set_password(users: &dyn AdminUserStore, username: &str, password: &str) -> Result<()> {
    validate_password(password).map_err(anyhow::Error::msg)?;

    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    if !users.update_password_hash(username, &password_hash).await? {
        bail!("User '{}' not found", username);
    }

    info!("Password updated for '{}'", username);
    Ok(())
}

pub async fn set_active(users: &dyn AdminUserStore, username: &str, active: bool) -> Result<()> {
    if !users.set_active(username, active).await? {
        bail!("User '{}' not found", username);
    }

    info!(
        "Account '{}' is now {}",
        username,
        if active { "active" } else { "inactive" }
    );
    Ok(())
}

/// Create the configured bootstrap admin when no account exists yet
///
/// Returns whether an account was created.
pub async fn bootstrap_admin(users: &dyn AdminUserStore, config: &ServerConfig) -> Result<bool> {
    if config.bootstrap_password.is_empty() {
        return Ok(false);
    }

    let existing = users
        .count()
        .await
        .context("Failed to count admin users")?;
    if existing > 0 {
        return Ok(false);
    }

    let password_hash = hash_password(&config.bootstrap_password)
        .map_err(|e| anyhow::anyhow!("Failed to hash bootstrap password: {}", e))?;

    users
        .create(&NewAdminUser {
            username: config.bootstrap_username.clone(),
            email: config.bootstrap_email.clone(),
            password_hash,
            role: Role::Admin,
        })
        .await
        .context("Failed to create bootstrap admin")?;

    warn!(
        "Created bootstrap admin '{}' with the configured default password; change it with `auth set-password`",
        config.bootstrap_username
    );
    Ok(true)
}
