//! Gallery endpoints and the generic image upload

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::{error, info};

use crate::{
    AppState,
    error::{ApiError, ApiPath, ApiQuery, ApiResult},
    models::{
        UploadResponse,
        gallery::{GalleryFields, GalleryQuery},
    },
    uploads::UploadForm,
};

/// Multipart part carrying a gallery image
const IMAGE_FIELD: &str = "image";

/// Multipart part carrying a generic upload
const FILE_FIELD: &str = "file";

fn gallery_fields(form: &UploadForm) -> ApiResult<GalleryFields> {
    let sort_order = match form.field("sortOrder").map(str::trim) {
        Some(raw) if !raw.is_empty() => raw
            .parse()
            .map_err(|_| ApiError::Validation("sortOrder must be a number".to_string()))?,
        _ => 0,
    };

    GalleryFields {
        title: form.field("title").unwrap_or_default().to_string(),
        category: form.field("category").unwrap_or_default().to_string(),
        description: form.field("description").map(str::to_string),
        sort_order,
    }
    .validate()
    .map_err(ApiError::Validation)
}

pub async fn list_gallery(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<GalleryQuery>,
) -> ApiResult<impl IntoResponse> {
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != "all");

    Ok(Json(state.gallery_repository.list(category).await?))
}

pub async fn get_gallery_image(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let image = state
        .gallery_repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Gallery image"))?;

    Ok(Json(image))
}

/// Create a gallery entry from a multipart form with an `image` part
pub async fn create_gallery_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = UploadForm::read(multipart, IMAGE_FIELD).await?;
    let fields = gallery_fields(&form)?;
    let image = form
        .image
        .as_ref()
        .ok_or_else(|| ApiError::Validation("image file is required".to_string()))?;

    let path = state.uploads.save(image).await?;

    match state.gallery_repository.create(&fields, &path).await {
        Ok(created) => {
            info!("Added gallery image {} ({})", created.id, path);
            Ok((StatusCode::CREATED, Json(created)))
        }
        Err(e) => {
            error!("Failed to store gallery row for {}: {}", path, e);
            state.uploads.remove(&path).await;
            Err(e.into())
        }
    }
}

/// Replace a gallery entry's fields, and its image when a new one is sent
pub async fn update_gallery_image(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = UploadForm::read(multipart, IMAGE_FIELD).await?;
    let fields = gallery_fields(&form)?;

    let existing = state
        .gallery_repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Gallery image"))?;

    let new_path = match &form.image {
        Some(image) => Some(state.uploads.save(image).await?),
        None => None,
    };

    let updated = match state
        .gallery_repository
        .update(id, &fields, new_path.as_deref())
        .await
    {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(path) = &new_path {
                state.uploads.remove(path).await;
            }
            return Err(e.into());
        }
    };

    let Some(updated) = updated else {
        if let Some(path) = &new_path {
            state.uploads.remove(path).await;
        }
        return Err(ApiError::NotFound("Gallery image"));
    };

    if new_path.is_some() {
        state.uploads.remove(&existing.image_path).await;
    }

    Ok(Json(updated))
}

/// Delete a gallery entry and, best effort, its stored file
pub async fn delete_gallery_image(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let path = state
        .gallery_repository
        .delete(id)
        .await?
        .ok_or(ApiError::NotFound("Gallery image"))?;

    state.uploads.remove(&path).await;

    info!("Deleted gallery image {}", id);
    Ok(Json(json!({"message": "Gallery image deleted successfully"})))
}

/// Store an image for use in another entity's `image` field
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = UploadForm::read(multipart, FILE_FIELD).await?;
    let image = form
        .image
        .as_ref()
        .ok_or_else(|| ApiError::Validation("No file uploaded".to_string()))?;

    let path = state.uploads.save(image).await?;
    Ok((StatusCode::CREATED, Json(UploadResponse { path })))
}
