//! Testimonial endpoints

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use common::identity::SessionIdentity;
use serde_json::json;

use crate::{
    AppState,
    error::{ApiError, ApiJson, ApiPath, ApiQuery, ApiResult},
    models::{VisibilityQuery, testimonial::TestimonialPayload},
};

pub async fn list_testimonials(
    State(state): State<AppState>,
    identity: Option<Extension<SessionIdentity>>,
    ApiQuery(query): ApiQuery<VisibilityQuery>,
) -> ApiResult<impl IntoResponse> {
    let include_inactive = query.all && identity.is_some();
    Ok(Json(
        state.testimonial_repository.list(include_inactive).await?,
    ))
}

pub async fn get_testimonial(
    State(state): State<AppState>,
    identity: Option<Extension<SessionIdentity>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let testimonial = state
        .testimonial_repository
        .find_by_id(id)
        .await?
        .filter(|t| t.is_active || identity.is_some())
        .ok_or(ApiError::NotFound("Testimonial"))?;

    Ok(Json(testimonial))
}

pub async fn create_testimonial(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TestimonialPayload>,
) -> ApiResult<impl IntoResponse> {
    let payload = payload.validate().map_err(ApiError::Validation)?;
    let testimonial = state.testimonial_repository.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(testimonial)))
}

pub async fn update_testimonial(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<TestimonialPayload>,
) -> ApiResult<impl IntoResponse> {
    let payload = payload.validate().map_err(ApiError::Validation)?;
    let testimonial = state
        .testimonial_repository
        .update(id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Testimonial"))?;

    Ok(Json(testimonial))
}

pub async fn delete_testimonial(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    if !state.testimonial_repository.delete(id).await? {
        return Err(ApiError::NotFound("Testimonial"));
    }

    Ok(Json(json!({"message": "Testimonial deleted successfully"})))
}
