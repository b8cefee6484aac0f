//! Custom error types for the common library
//!
//! This module defines the infrastructure error types shared by the auth and
//! API services.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A stored value could not be mapped onto its Rust type
    #[error("Database decode error: {0}")]
    Decode(String),
}

impl DatabaseError {
    /// Whether the failure was a unique constraint violation
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DatabaseError::Query(SqlxError::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Errors raised while issuing or verifying session tokens
#[derive(Error, Debug)]
pub enum SessionError {
    /// No token was presented with the request
    #[error("No session token presented")]
    MissingToken,

    /// Token was well formed and signed but is past its expiry
    #[error("Session token expired")]
    Expired,

    /// Signature, encoding or structure check failed
    #[error("Invalid session token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    /// Claims decoded but carry unusable values
    #[error("Malformed session claims: {0}")]
    MalformedClaims(String),

    /// Token could not be signed
    #[error("Failed to sign session token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Cookie or secret configuration problem
    #[error("Session configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with SessionError
pub type SessionResult<T> = Result<T, SessionError>;
