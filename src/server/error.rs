use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::planner::PlannerError;

/// Wire-level error: an `{"error": message}` body with a status derived
/// from the failure taxonomy.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<PlannerError> for ApiError {
    fn from(err: PlannerError) -> Self {
        match err {
            PlannerError::Validation(message) => Self {
                status: StatusCode::BAD_REQUEST,
                message,
            },
            PlannerError::NotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: "not found".into(),
            },
            PlannerError::Storage(err) => {
                error!("storage failure: {err}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal server error".into(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
