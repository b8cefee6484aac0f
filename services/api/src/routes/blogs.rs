//! Blog post endpoints

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::identity::SessionIdentity;
use serde_json::json;
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ApiJson, ApiPath, ApiQuery, ApiResult},
    models::blog::{BlogPayload, BlogQuery},
};

/// List posts, or fetch a single post with `?slug=`
pub async fn list_blogs(
    State(state): State<AppState>,
    identity: Option<Extension<SessionIdentity>>,
    ApiQuery(query): ApiQuery<BlogQuery>,
) -> ApiResult<Response> {
    let signed_in = identity.is_some();

    if let Some(slug) = query.slug.as_deref().filter(|s| !s.is_empty()) {
        let post = state
            .blog_repository
            .find_by_slug(slug)
            .await?
            .filter(|p| p.published || signed_in)
            .ok_or(ApiError::NotFound("Blog post"))?;
        return Ok(Json(post).into_response());
    }

    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let posts = state
        .blog_repository
        .list(category, query.all && signed_in)
        .await?;

    Ok(Json(posts).into_response())
}

pub async fn get_blog(
    State(state): State<AppState>,
    identity: Option<Extension<SessionIdentity>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let post = state
        .blog_repository
        .find_by_id(id)
        .await?
        .filter(|p| p.published || identity.is_some())
        .ok_or(ApiError::NotFound("Blog post"))?;

    Ok(Json(post))
}

pub async fn create_blog(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BlogPayload>,
) -> ApiResult<impl IntoResponse> {
    let payload = payload.validate().map_err(ApiError::Validation)?;
    let post = state.blog_repository.create(&payload).await?;

    info!("Created blog post {} ({})", post.id, post.slug);
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_blog(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<BlogPayload>,
) -> ApiResult<impl IntoResponse> {
    let payload = payload.validate().map_err(ApiError::Validation)?;
    let post = state
        .blog_repository
        .update(id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Blog post"))?;

    Ok(Json(post))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    if !state.blog_repository.delete(id).await? {
        return Err(ApiError::NotFound("Blog post"));
    }

    info!("Deleted blog post {}", id);
    Ok(Json(json!({"message": "Blog post deleted successfully"})))
}
