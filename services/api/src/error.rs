//! Custom error types for the API service

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::models::appointment::AppointmentStatus;

/// Message returned for rejected upload types
pub const INVALID_FILE_TYPE: &str =
    "Invalid file type. Only JPEG, PNG, GIF and WebP images are allowed";

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request payload failed validation
    #[error("{0}")]
    Validation(String),

    /// Uploaded file is not an accepted image type
    #[error("{}", INVALID_FILE_TYPE)]
    UnsupportedMedia,

    /// Unauthorized access
    #[error("Unauthorized")]
    Unauthorized,

    /// Requested record does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Status change not allowed by the appointment workflow
    #[error("Cannot change appointment status from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),

    /// Stored file could not be written
    #[error("Upload error: {0}")]
    Upload(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::UnsupportedMedia => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApiError::Database(e) if e.is_unique_violation() => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Upload(_) | ApiError::InternalServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let error_message = match &self {
            ApiError::Database(e) if e.is_unique_violation() => {
                "A record with this slug already exists".to_string()
            }
            ApiError::Database(e) => {
                error!("Database failure: {}", e);
                "Database error".to_string()
            }
            ApiError::Upload(e) => {
                error!("Upload failure: {}", e);
                "Failed to store upload".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// JSON extractor and response that reports malformed bodies as `ApiError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

/// Path extractor reporting unparsable segments as `ApiError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query string extractor reporting bad parameters as `ApiError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_error_statuses_and_bodies() {
        let (status, body) = render(ApiError::Validation("email is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "email is required"}));

        let (status, body) = render(ApiError::UnsupportedMedia).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": INVALID_FILE_TYPE}));

        let (status, body) = render(ApiError::NotFound("Appointment")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Appointment not found"}));

        let (status, body) = render(ApiError::InvalidTransition {
            from: AppointmentStatus::Completed,
            to: AppointmentStatus::Pending,
        })
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body,
            json!({"error": "Cannot change appointment status from completed to pending"})
        );
    }

    #[tokio::test]
    async fn test_internal_details_are_not_leaked() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/srv/secret/path");
        let (status, body) = render(ApiError::Upload(io)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains("/srv/secret/path"));
    }
}
