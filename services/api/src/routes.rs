//! API service routes

use std::path::Path;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    AppState,
    middleware::{guard_pages, optional_session, require_session},
};

pub mod appointments;
pub mod blogs;
pub mod doctors;
pub mod gallery;
pub mod services;
pub mod testimonials;

/// Create the router for the API service
///
/// Stored uploads are served under the upload store's public prefix and the
/// admin pages under `/admin`, behind the page guard.
pub fn create_router(
    state: AppState,
    admin_pages_dir: impl AsRef<Path>,
    max_upload_bytes: usize,
) -> Router {
    let upload_limit = DefaultBodyLimit::max(max_upload_bytes);
    let uploads = state.uploads.clone();

    let public_routes = Router::new()
        .route("/appointments", post(appointments::create_appointment))
        .route("/services", get(services::list_services))
        .route("/services/:id", get(services::get_service))
        .route("/doctors", get(doctors::list_doctors))
        .route("/doctors/:id", get(doctors::get_doctor))
        .route("/gallery", get(gallery::list_gallery))
        .route("/gallery/:id", get(gallery::get_gallery_image))
        .route("/blogs", get(blogs::list_blogs))
        .route("/blogs/:id", get(blogs::get_blog))
        .route("/testimonials", get(testimonials::list_testimonials))
        .route("/testimonials/:id", get(testimonials::get_testimonial))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_session,
        ));

    let protected_routes = Router::new()
        .route("/appointments", get(appointments::list_appointments))
        .route(
            "/appointments/:id",
            get(appointments::get_appointment).put(appointments::update_status),
        )
        .route("/stats/appointments", get(appointments::appointment_stats))
        .route("/services", post(services::create_service))
        .route(
            "/services/:id",
            put(services::update_service).delete(services::delete_service),
        )
        .route("/doctors", post(doctors::create_doctor))
        .route(
            "/doctors/:id",
            put(doctors::update_doctor).delete(doctors::delete_doctor),
        )
        .route(
            "/gallery",
            post(gallery::create_gallery_image).layer(upload_limit.clone()),
        )
        .route(
            "/gallery/:id",
            put(gallery::update_gallery_image)
                .layer(upload_limit.clone())
                .delete(gallery::delete_gallery_image),
        )
        .route("/blogs", post(blogs::create_blog))
        .route(
            "/blogs/:id",
            put(blogs::update_blog).delete(blogs::delete_blog),
        )
        .route("/testimonials", post(testimonials::create_testimonial))
        .route(
            "/testimonials/:id",
            put(testimonials::update_testimonial).delete(testimonials::delete_testimonial),
        )
        .route("/upload", post(gallery::upload_image).layer(upload_limit))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let admin_pages = Router::new()
        .nest_service(
            "/admin",
            ServeDir::new(admin_pages_dir).append_index_html_on_directories(true),
        )
        .layer(middleware::from_fn_with_state(state.clone(), guard_pages));

    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_pages)
        .nest_service(uploads.url_prefix(), ServeDir::new(uploads.dir()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = common::database::health_check(&state.db_pool)
        .await
        .unwrap_or(false);

    Json(json!({
        "status": "ok",
        "service": "api-service",
        "database": database,
    }))
}
