use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::services::lifecycle::LifecycleError;
use serde_json::json;
use thiserror::Error;

/// Error surface of every route. Each variant maps to one HTTP status; the
/// body is always `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Server error")]
    Internal(String),
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::Validation(message) => Self::Validation(message),
            LifecycleError::NotFound => Self::NotFound("Request not found".to_owned()),
            LifecycleError::AlreadyDecided(status) => {
                Self::Conflict(format!("Request already {status}"))
            }
            LifecycleError::Store(err) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // The internal detail goes to the log, never to the caller
        let message = match &self {
            Self::Internal(detail) => {
                log::error!("internal error: {detail}");
                "Server error".to_owned()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
