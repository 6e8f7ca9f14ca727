//! API error types and responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::workflow::WorkflowError;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// No live session on a gated endpoint
    Unauthorized,
    /// Bad request
    BadRequest(String),
    /// Internal server error
    InternalError(String),
    /// The remote platform rejected a call; its error payload is relayed
    /// to the client verbatim
    Platform(serde_json::Value),
}

/// Error response body
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "login required".to_string(),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::InternalError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
            ApiError::Platform(payload) => {
                return (StatusCode::BAD_GATEWAY, Json(payload)).into_response();
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            // The platform's structured payload passes through untouched
            WorkflowError::Platform(qds) => match qds.payload() {
                Some(payload) => ApiError::Platform(payload.clone()),
                None => ApiError::InternalError(qds.to_string()),
            },
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::json;

    use crate::qds::QdsError;

    #[tokio::test]
    async fn test_unauthorized_response() {
        let response = ApiError::Unauthorized.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.error, "unauthorized");
    }

    #[tokio::test]
    async fn test_platform_payload_relayed_verbatim() {
        let payload = json!({"error": {"error_message": "label already taken"}});
        let response = ApiError::Platform(payload.clone()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let relayed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(relayed, payload);
    }

    #[tokio::test]
    async fn test_data_store_not_found_maps_to_internal_error() {
        let err = WorkflowError::DataStoreNotFound {
            name: "retail".to_string(),
            matches: 0,
        };
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_workflow_platform_error_with_payload() {
        let err = WorkflowError::Platform(QdsError::Api {
            status: 422,
            payload: json!({"error": "nope"}),
        });
        match ApiError::from(err) {
            ApiError::Platform(payload) => assert_eq!(payload["error"], "nope"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
