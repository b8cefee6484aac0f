//! Session guard deciding access to protected paths
//!
//! The guard is a pure gate: it looks at the request path and the presented
//! token, and never touches storage. Services wire it into axum middleware and
//! choose how a rejection is rendered (redirect for pages, 401 for API calls).

use crate::error::{SessionError, SessionResult};
use crate::identity::SessionIdentity;
use crate::jwt::TokenService;

/// Path prefix of the admin area
pub const PROTECTED_PREFIX: &str = "/admin";

/// Admin login page, reachable without a session
pub const LOGIN_PATH: &str = "/admin/login";

/// Outcome of evaluating a request against the guard
#[derive(Debug)]
pub enum GuardDecision {
    /// Path lies outside the protected prefix
    Unprotected,
    /// Path is the login page (or beneath it)
    Exempt,
    /// Valid session; identity to attach to the request
    Allow(SessionIdentity),
    /// Protected path without a usable session
    Reject(SessionError),
}

/// Gate for the admin area
#[derive(Clone)]
pub struct SessionGuard {
    tokens: TokenService,
    protected_prefix: String,
    login_path: String,
}

impl SessionGuard {
    /// Guard the default `/admin` prefix with `/admin/login` exempt
    pub fn new(tokens: TokenService) -> Self {
        Self::with_paths(tokens, PROTECTED_PREFIX, LOGIN_PATH)
    }

    pub fn with_paths(tokens: TokenService, protected_prefix: &str, login_path: &str) -> Self {
        Self {
            tokens,
            protected_prefix: protected_prefix.trim_end_matches('/').to_string(),
            login_path: login_path.trim_end_matches('/').to_string(),
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Verify a presented token regardless of path
    pub fn authorize(&self, token: Option<&str>) -> SessionResult<SessionIdentity> {
        match token {
            Some(token) if !token.is_empty() => self.tokens.verify(token),
            _ => Err(SessionError::MissingToken),
        }
    }

    /// Decide whether a request for `path` may proceed
    pub fn evaluate(&self, path: &str, token: Option<&str>) -> GuardDecision {
        if !is_within(path, &self.protected_prefix) {
            return GuardDecision::Unprotected;
        }
        if is_within(path, &self.login_path) {
            return GuardDecision::Exempt;
        }

        match self.authorize(token) {
            Ok(identity) => GuardDecision::Allow(identity),
            Err(e) => GuardDecision::Reject(e),
        }
    }
}

/// Segment-aware prefix test: `/admin` covers `/admin` and `/admin/x`,
/// not `/administrator`
fn is_within(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
