//! Appointment booking and status workflow endpoints

use axum::{
    Extension, Json,
    extract::State,
    response::IntoResponse,
};
use common::identity::SessionIdentity;
use serde_json::json;
use tracing::{debug, info};

use crate::{
    AppState,
    error::{ApiError, ApiJson, ApiPath, ApiResult},
    models::{
        CreatedResponse,
        appointment::{AppointmentStatus, CreateAppointmentRequest, UpdateStatusRequest},
    },
};

/// Public booking endpoint; the stored status is always `pending`
pub async fn create_appointment(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateAppointmentRequest>,
) -> ApiResult<impl IntoResponse> {
    let appointment = payload.validate().map_err(ApiError::Validation)?;
    let id = state.appointments.create(&appointment).await?;

    info!("Booked appointment {}", id);
    Ok(Json(CreatedResponse { id }))
}

pub async fn list_appointments(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.appointments.list().await?))
}

pub async fn get_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let appointment = state
        .appointments
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Appointment"))?;

    Ok(Json(appointment))
}

/// Conditional writes attempted before a status change is reported as a conflict
const STATUS_UPDATE_ATTEMPTS: usize = 3;

/// Move an appointment to a new status under the configured policy
///
/// The write only applies if the status is still the one the policy was
/// checked against; otherwise the check is repeated on the fresh status.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateStatusRequest>,
) -> ApiResult<impl IntoResponse> {
    let next: AppointmentStatus = payload.status.trim().parse().map_err(ApiError::Validation)?;

    let mut attempt = 0;
    let current = loop {
        let current = state
            .appointments
            .status(id)
            .await?
            .ok_or(ApiError::NotFound("Appointment"))?;

        if !state.status_policy.permits(current, next) {
            return Err(ApiError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        if current == next || state.appointments.set_status(id, current, next).await? {
            break current;
        }

        attempt += 1;
        debug!(
            "Appointment {} changed while moving {} -> {}",
            id, current, next
        );
        if attempt == STATUS_UPDATE_ATTEMPTS {
            return Err(ApiError::InvalidTransition {
                from: current,
                to: next,
            });
        }
    };

    info!(
        "Appointment {} status {} -> {} by {}",
        id, current, next, identity.username
    );

    Ok(Json(json!({
        "message": "Appointment status updated",
        "status": next,
    })))
}

pub async fn appointment_stats(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.appointments.stats().await?))
}
