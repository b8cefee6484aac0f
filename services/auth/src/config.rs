//! Authentication service configuration

use common::settings;
use serde::Deserialize;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_address: String,
    /// Username of the account created when no admin exists yet
    pub bootstrap_username: String,
    /// Password of the bootstrap account; empty disables bootstrapping
    pub bootstrap_password: String,
    /// Email of the bootstrap account
    pub bootstrap_email: String,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `AUTH_BIND_ADDRESS` (default: "0.0.0.0:3000")
    /// - `AUTH_BOOTSTRAP_USERNAME` (default: "admin")
    /// - `AUTH_BOOTSTRAP_PASSWORD` (default: "admin123")
    /// - `AUTH_BOOTSTRAP_EMAIL` (default: "admin@clinic.local")
    pub fn from_env() -> Result<Self, config::ConfigError> {
        settings::env_builder("AUTH")
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("bootstrap_username", "admin")?
            .set_default("bootstrap_password", "admin123")?
            .set_default("bootstrap_email", "admin@clinic.local")?
            .build()?
            .try_deserialize()
    }
}
