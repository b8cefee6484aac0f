//! Doctor profile endpoints

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
    models::{VisibilityQuery, doctor::DoctorPayload},
};

pub async fn list_doctors(
    State(state): State<AppState>,
    identity: Option<Extension<SessionIdentity>>,
    ApiQuery(query): ApiQuery<VisibilityQuery>,
) -> ApiResult<impl IntoResponse> {
    let include_inactive = query.all && identity.is_some();
    Ok(Json(state.doctor_repository.list(include_inactive).await?))
}

pub async fn get_doctor(
    State(state): State<AppState>,
    identity: Option<Extension<SessionIdentity>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let doctor = state
        .doctor_repository
        .find_by_id(id)
        .await?
        .filter(|d| d.is_active || identity.is_some())
        .ok_or(ApiError::NotFound("Doctor"))?;

    Ok(Json(doctor))
}

pub async fn create_doctor(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DoctorPayload>,
) -> ApiResult<impl IntoResponse> {
    let payload = payload.validate().map_err(ApiError::Validation)?;
    let doctor = state.doctor_repository.create(&payload).await?;

    info!("Created doctor {}", doctor.id);
    Ok((StatusCode::CREATED, Json(doctor)))
}

pub async fn update_doctor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<DoctorPayload>,
) -> ApiResult<impl IntoResponse> {
    let payload = payload.validate().map_err(ApiError::Validation)?;
    let doctor = state
        .doctor_repository
        .update(id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Doctor"))?;

    Ok(Json(doctor))
}

pub async fn delete_doctor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    if !state.doctor_repository.delete(id).await? {
        return Err(ApiError::NotFound("Doctor"));
    }

    info!("Deleted doctor {}", id);
    Ok(Json(json!({"message": "Doctor deleted successfully"})))
}
