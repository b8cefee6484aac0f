//! Clinic service endpoints

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use common::identity::SessionIdentity;
use serde_json::json;
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ApiJson, ApiPath, ApiQuery, ApiResult},
    models::{VisibilityQuery, service::ServicePayload},
};

pub async fn list_services(
    State(state): State<AppState>,
    identity: Option<Extension<SessionIdentity>>,
    ApiQuery(query): ApiQuery<VisibilityQuery>,
) -> ApiResult<impl IntoResponse> {
    let include_inactive = query.all && identity.is_some();
    Ok(Json(state.service_repository.list(include_inactive).await?))
}

pub async fn get_service(
    State(state): State<AppState>,
    identity: Option<Extension<SessionIdentity>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let service = state
        .service_repository
        .find_by_id(id)
        .await?
        .filter(|s| s.is_active || identity.is_some())
        .ok_or(ApiError::NotFound("Service"))?;

    Ok(Json(service))
}

pub async fn create_service(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ServicePayload>,
) -> ApiResult<impl IntoResponse> {
    let payload = payload.validate().map_err(ApiError::Validation)?;
    let service = state.service_repository.create(&payload).await?;

    info!("Created service {} ({})", service.id, service.slug);
    Ok((StatusCode::CREATED, Json(service)))
}

pub async fn update_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<ServicePayload>,
) -> ApiResult<impl IntoResponse> {
    let payload = payload.validate().map_err(ApiError::Validation)?;
    let service = state
        .service_repository
        .update(id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Service"))?;

    Ok(Json(service))
}

pub async fn delete_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    if !state.service_repository.delete(id).await? {
        return Err(ApiError::NotFound("Service"));
    }

    info!("Deleted service {}", id);
    Ok(Json(json!({"message": "Service deleted successfully"})))
}
