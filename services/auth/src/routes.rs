//! Authentication service routes

use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use common::cookie::{expired_session_cookie, session_cookie};
use common::identity::SessionIdentity;
use serde::Serialize;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    AppState, authenticator::AuthenticationError, middleware::require_session,
    models::LoginCredentials,
};

/// Response carrying the authenticated user's public identity
#[derive(Serialize)]
pub struct UserResponse {
    pub user: SessionIdentity,
}

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/auth/check", get(check))
        .route("/auth/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/login", post(login))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginCredentials>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let Json(credentials) = payload.map_err(|e| AuthError::BadRequest(e.body_text()))?;
    let username = credentials.username.as_str();

    if username.trim().is_empty() || credentials.password.is_empty() {
        return Err(AuthError::BadRequest(
            AuthenticationError::MissingCredentials.to_string(),
        ));
    }

    info!("Login attempt for user: {}", username);

    if !state.rate_limiter.is_allowed(username).await {
        return Err(AuthError::TooManyAttempts);
    }

    let identity = match state
        .authenticator
        .authenticate(username, &credentials.password)
        .await
    {
        Ok(identity) => identity,
        Err(AuthenticationError::InvalidCredentials) => {
            state.rate_limiter.record_failure(username).await;
            return Err(AuthError::InvalidCredentials);
        }
        Err(AuthenticationError::MissingCredentials) => {
            return Err(AuthError::BadRequest(
                AuthenticationError::MissingCredentials.to_string(),
            ));
        }
        Err(e) => {
            error!("Failed to authenticate user: {}", e);
            return Err(AuthError::InternalServerError);
        }
    };

    state.rate_limiter.reset(username).await;

    let token = state.guard.tokens().issue(&identity).map_err(|e| {
        error!("Failed to issue session token: {}", e);
        AuthError::InternalServerError
    })?;

    let cookie = session_cookie(
        &token,
        state.guard.tokens().token_expiry(),
        &state.cookie_config,
    )
    .map_err(|e| {
        error!("Failed to build session cookie: {}", e);
        AuthError::InternalServerError
    })?;

    info!("User {} logged in", identity.username);

    Ok((
        StatusCode::OK,
        jar.add(cookie),
        Json(UserResponse { user: identity }),
    ))
}

/// Session check endpoint
pub async fn check(Extension(identity): Extension<SessionIdentity>) -> impl IntoResponse {
    Json(UserResponse { user: identity })
}

/// Logout endpoint
pub async fn logout(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    jar: CookieJar,
) -> impl IntoResponse {
    info!("User {} logged out", identity.username);

    (
        jar.remove(expired_session_cookie(&state.cookie_config)),
        Json(serde_json::json!({"message": "Logged out successfully"})),
    )
}

/// Custom error type for authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Too many login attempts, try again later")]
    TooManyAttempts,

    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            AuthError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticator::Authenticator;
    use crate::rate_limiter::{RateLimiter, RateLimiterConfig};
    use crate::repositories::memory::MemoryUserStore;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use common::cookie::{SESSION_COOKIE, SessionCookieConfig};
    use common::guard::SessionGuard;
    use common::identity::Role;
    use common::jwt::{DEFAULT_TOKEN_EXPIRY, JwtConfig, TokenService};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn test_state(max_attempts: u32) -> AppState {
        let store = Arc::new(MemoryUserStore::with_user("admin", "admin123", Role::Admin).await);
        let tokens = TokenService::new(JwtConfig {
            secret: "auth-routes-test-secret-0123456789abcdef".to_string(),
            token_expiry: DEFAULT_TOKEN_EXPIRY,
        })
        .unwrap();

        AppState {
            authenticator: Authenticator::new(store).unwrap(),
            guard: SessionGuard::new(tokens),
            cookie_config: SessionCookieConfig::default(),
            rate_limiter: RateLimiter::new(RateLimiterConfig {
                max_attempts,
                window_seconds: 300,
                ban_seconds: 900,
            }),
        }
    }

    fn login_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn session_cookie_value(response: &Response) -> Option<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{}=", SESSION_COOKIE)))
            .map(|v| v.to_string())
    }

    #[tokio::test]
    async fn test_login_with_seeded_admin_sets_cookie() {
        let app = create_router(test_state(5).await);

        let response = app
            .oneshot(login_request(json!({"username": "admin", "password": "admin123"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie_value(&response).expect("session cookie set");
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=86400"));

        let body = body_json(response).await;
        assert_eq!(body["user"]["username"], "admin");
        assert_eq!(body["user"]["role"], "admin");
        assert!(body["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_get_identical_401() {
        let state = test_state(5).await;

        let wrong = create_router(state.clone())
            .oneshot(login_request(json!({"username": "admin", "password": "wrongpass"})))
            .await
            .unwrap();
        let unknown = create_router(state)
            .oneshot(login_request(json!({"username": "nobody", "password": "admin123"})))
            .await
            .unwrap();

        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert!(session_cookie_value(&wrong).is_none());

        let wrong_body = to_bytes(wrong.into_body(), usize::MAX).await.unwrap();
        let unknown_body = to_bytes(unknown.into_body(), usize::MAX).await.unwrap();
        assert_eq!(wrong_body, unknown_body);
        assert_eq!(
            serde_json::from_slice::<Value>(&wrong_body).unwrap(),
            json!({"error": "Invalid credentials"})
        );
    }

    #[tokio::test]
    async fn test_username_must_match_exactly() {
        let state = test_state(5).await;

        for username in [" admin ", "Admin"] {
            let response = create_router(state.clone())
                .oneshot(login_request(json!({"username": username, "password": "admin123"})))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert!(session_cookie_value(&response).is_none());
        }
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let app = create_router(test_state(5).await);
        let response = app
            .oneshot(login_request(json!({"username": "admin"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Username and password are required"})
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = create_router(test_state(5).await);
        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_repeated_failures_are_rate_limited() {
        let state = test_state(2).await;

        for _ in 0..2 {
            let response = create_router(state.clone())
                .oneshot(login_request(json!({"username": "admin", "password": "nope"})))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        let response = create_router(state)
            .oneshot(login_request(json!({"username": "admin", "password": "admin123"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_check_without_cookie_is_unauthorized() {
        let app = create_router(test_state(5).await);
        let response = app
            .oneshot(Request::builder().uri("/auth/check").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({"error": "Unauthorized"}));
    }

    #[tokio::test]
    async fn test_check_with_login_cookie_returns_user() {
        let state = test_state(5).await;

        let login = create_router(state.clone())
            .oneshot(login_request(json!({"username": "admin", "password": "admin123"})))
            .await
            .unwrap();
        let set_cookie = session_cookie_value(&login).unwrap();
        let cookie_pair = set_cookie.split(';').next().unwrap().to_string();

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/auth/check")
                    .header(header::COOKIE, cookie_pair)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user"]["username"], "admin");
        assert_eq!(body["user"]["id"], 1);
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let state = test_state(5).await;
        let token = state
            .guard
            .tokens()
            .issue(&SessionIdentity {
                id: 1,
                username: "admin".to_string(),
                role: Role::Admin,
            })
            .unwrap();

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/logout")
                    .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cleared = session_cookie_value(&response).expect("removal cookie");
        assert!(cleared.starts_with(&format!("{}=;", SESSION_COOKIE)));
        assert!(cleared.contains("Max-Age=0"));
    }
}
