//! API service configuration

use common::settings;
use serde::Deserialize;

use crate::models::appointment::StatusPolicy;

/// Default cap on upload request bodies (5 MiB)
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_address: String,
    /// Directory holding the static admin pages served under `/admin`
    pub admin_pages_dir: String,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `API_BIND_ADDRESS` (default: "0.0.0.0:3001")
    /// - `API_ADMIN_PAGES_DIR` (default: "public/admin")
    pub fn from_env() -> Result<Self, config::ConfigError> {
        settings::env_builder("API")
            .set_default("bind_address", "0.0.0.0:3001")?
            .set_default("admin_pages_dir", "public/admin")?
            .build()?
            .try_deserialize()
    }
}

/// Upload storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Directory uploaded files are written to
    pub dir: String,
    /// Public path prefix stored files are served under
    pub url_prefix: String,
    /// Largest accepted upload request body
    pub max_bytes: usize,
}

impl UploadConfig {
    /// Create a new UploadConfig from environment variables
    ///
    /// # Environment Variables
    /// - `UPLOAD_DIR` (default: "public/uploads")
    /// - `UPLOAD_URL_PREFIX` (default: "/uploads")
    /// - `UPLOAD_MAX_BYTES` (default: 5 MiB)
    pub fn from_env() -> Result<Self, config::ConfigError> {
        settings::env_builder("UPLOAD")
            .set_default("dir", "public/uploads")?
            .set_default("url_prefix", "/uploads")?
            .set_default("max_bytes", DEFAULT_UPLOAD_MAX_BYTES as i64)?
            .build()?
            .try_deserialize()
    }
}

/// Appointment workflow configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentConfig {
    pub status_policy: StatusPolicy,
}

impl AppointmentConfig {
    /// # Environment Variables
    /// - `APPOINTMENT_STATUS_POLICY`: `enforced` or `unrestricted` (default: "enforced")
    pub fn from_env() -> Result<Self, config::ConfigError> {
        settings::env_builder("APPOINTMENT")
            .set_default("status_policy", "enforced")?
            .build()?
            .try_deserialize()
    }
}
