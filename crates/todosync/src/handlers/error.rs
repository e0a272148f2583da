use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use todosync_core::storage::{repository_error_to_status_code, RepositoryError};

/// API error type for the todo handlers.
///
/// Storage failures carry their taxonomy through
/// `repository_error_to_status_code`; validation failures are rejected with
/// 400 before any store call. Bodies carry a short message only, never an
/// internal error representation.
#[derive(Debug)]
pub enum ApiError {
    Repository(RepositoryError),
    Validation(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Repository(err) => {
                let status = StatusCode::from_u16(repository_error_to_status_code(&err))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, err.to_string())
            }
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, message = %message, "API error");
        } else {
            tracing::warn!(status = %status, message = %message, "API error");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
