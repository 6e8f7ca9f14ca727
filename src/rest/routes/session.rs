//! Wizard step tracking.
//!
//! The server keeps no opinion on step ordering; it stores whatever step
//! the client declares and plays it back.

use axum::extract::State;
use axum::Json;

use crate::rest::dto::{SessionStateResponse, StepRequest};
use crate::rest::error::ApiError;
use crate::rest::session::CurrentSession;
use crate::rest::state::ApiState;

/// Get the wizard step for the current session
#[utoipa::path(
    get,
    path = "/step",
    tag = "Session",
    responses(
        (status = 200, description = "Current session state", body = SessionStateResponse),
        (status = 401, description = "No live session")
    )
)]
pub async fn get_step(CurrentSession(session): CurrentSession) -> Json<SessionStateResponse> {
    Json(SessionStateResponse {
        current_step: session.current_step,
    })
}

/// Update the wizard step for the current session
#[utoipa::path(
    post,
    path = "/step",
    tag = "Session",
    request_body = StepRequest,
    responses(
        (status = 200, description = "Session state after the update", body = SessionStateResponse),
        (status = 401, description = "No live session")
    )
)]
pub async fn set_step(
    CurrentSession(session): CurrentSession,
    State(state): State<ApiState>,
    Json(request): Json<StepRequest>,
) -> Result<Json<SessionStateResponse>, ApiError> {
    let session = match request.step {
        Some(step) => state
            .sessions
            .set_step(session.id, step)
            .ok_or(ApiError::Unauthorized)?,
        None => session,
    };
    Ok(Json(SessionStateResponse {
        current_step: session.current_step,
    }))
}
