//! Middleware for session token validation

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use common::cookie::extract_token;
use tracing::debug;

use crate::{AppState, routes::AuthError};

/// Require a valid session cookie (or bearer token) before the handler runs
///
/// The decoded [`common::identity::SessionIdentity`] is inserted into the
/// request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_token(req.headers());

    let identity = state.guard.authorize(token.as_deref()).map_err(|e| {
        debug!("Rejected session: {}", e);
        AuthError::Unauthorized
    })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
