//! Session cookie construction and token extraction

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::HeaderMap;
use serde::Deserialize;

use crate::error::{SessionError, SessionResult};
use crate::settings;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "admin-token";

/// Session cookie configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionCookieConfig {
    /// Mark the cookie `Secure` (enable in production behind TLS)
    pub secure_cookies: bool,
}

impl SessionCookieConfig {
    /// Create a new SessionCookieConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SESSION_SECURE_COOKIES`: `true` to set the `Secure` flag (default: false)
    pub fn from_env() -> SessionResult<Self> {
        settings::env_builder("SESSION")
            .set_default("secure_cookies", false)
            .and_then(|builder| builder.build())
            .and_then(|config| config.try_deserialize())
            .map_err(|e| SessionError::Configuration(e.to_string()))
    }
}

/// Build the cookie that carries a freshly issued session token
pub fn session_cookie(
    token: &str,
    max_age_seconds: u64,
    config: &SessionCookieConfig,
) -> SessionResult<Cookie<'static>> {
    let mut raw = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token, max_age_seconds
    );
    if config.secure_cookies {
        raw.push_str("; Secure");
    }

    Cookie::parse(raw).map_err(|e| SessionError::Configuration(e.to_string()))
}

/// Cookie that, once removed from a jar, clears the session on the client
pub fn expired_session_cookie(config: &SessionCookieConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .build()
}

/// Pull the session token from the request headers
///
/// The `admin-token` cookie wins; an `Authorization: Bearer` header is
/// accepted as a fallback for API clients.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}
