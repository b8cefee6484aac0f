//! Session middleware for API calls and admin pages

use axum::{
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use common::cookie::extract_token;
use common::guard::GuardDecision;
use common::identity::SessionIdentity;
use tracing::debug;

use crate::{error::ApiError, state::AppState};

/// Require a valid session for API calls; rejects with 401 JSON
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers());

    let identity = state.guard.authorize(token.as_deref()).map_err(|e| {
        debug!("Rejected API session: {}", e);
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Attach the session identity when a valid token is presented, never reject
///
/// Lets public listings honor `?all=true` for signed-in staff.
pub async fn optional_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = extract_token(req.headers());

    if let Ok(identity) = state.guard.authorize(token.as_deref()) {
        req.extensions_mut().insert(identity);
    }

    next.run(req).await
}

/// Guard the admin pages; redirects to the login page without a session
pub async fn guard_pages(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // Nested routers see a stripped path; decide on the full one.
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let token = extract_token(req.headers());

    match state.guard.evaluate(&path, token.as_deref()) {
        GuardDecision::Unprotected | GuardDecision::Exempt => next.run(req).await,
        GuardDecision::Allow(identity) => {
            req.extensions_mut().insert::<SessionIdentity>(identity);
            next.run(req).await
        }
        GuardDecision::Reject(e) => {
            debug!("Redirecting {} to login: {}", path, e);
            Redirect::to(state.guard.login_path()).into_response()
        }
    }
}
