use axum::response::IntoResponse;
use axum::Json;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body shared by every error response
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ErrorEnvelope {
    /// Always `false`
    pub success: bool,
    /// The HTTP status code
    pub error: u16,
    /// Human readable description
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: status_code.as_u16(),
            message: message.into(),
        }
    }

    /// Render the envelope with its status code
    pub fn into_response_with(self, status_code: StatusCode) -> axum::response::Response {
        (status_code, Json(self)).into_response()
    }
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
}

impl ApiError {
    /// Create a new ApiError with a message and status code
    pub fn new<S: ToString>(message: S, status_code: StatusCode) -> Self {
        Self {
            message: message.to_string(),
            status_code,
        }
    }

    /// Create new Internal Server Error (500) with a message
    pub fn internal<S: ToString>(message: S) -> Self {
        Self::new(message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Create new Bad Request Error (400) with a message
    pub fn bad_request<S: ToString>(message: S) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST)
    }

    /// Create new Not Found Error (404) with a message
    pub fn not_found<S: ToString>(message: S) -> Self {
        Self::new(message, StatusCode::NOT_FOUND)
    }

    /// Create new Unprocessable Entity Error (422) with a message
    pub fn unprocessable<S: ToString>(message: S) -> Self {
        Self::new(message, StatusCode::UNPROCESSABLE_ENTITY)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        ErrorEnvelope::new(self.status_code, self.message).into_response_with(self.status_code)
    }
}
