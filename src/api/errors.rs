//! # API Errors
//!
//! The error taxonomy every endpoint reports through. Each variant maps to
//! one status code and renders the shared error envelope:
//!
//! ```json
//! {"success": false, "error": 404, "message": "resource not found"}
//! ```
//!
//! The detail string carried by a variant is for logs only; clients see the
//! fixed short message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Malformed or semantically invalid request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Requested entity or page has no data
    #[error("Not found: {0}")]
    NotFound(String),

    /// Verb not defined for the path
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Well-formed request that could not be completed
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    /// Uncaught failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest(detail.into())
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::Unprocessable(detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message
    pub fn message(&self) -> &'static str {
        message_for(self.status_code())
    }
}

/// Short message for a status code, shared with framework-generated errors
pub fn message_for(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "bad request",
        StatusCode::NOT_FOUND => "resource not found",
        StatusCode::METHOD_NOT_ALLOWED => "method not allowed",
        StatusCode::UNPROCESSABLE_ENTITY => "unprocessable",
        StatusCode::INTERNAL_SERVER_ERROR => "internal server error",
        other => other.canonical_reason().unwrap_or("error"),
    }
}

/// Error envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn for_status(status: StatusCode) -> Self {
        Self {
            success: false,
            error: status.as_u16(),
            message: message_for(status).to_string(),
        }
    }
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self::for_status(err.status_code())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::unprocessable("x").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_envelope_hides_detail() {
        let err = ApiError::internal("connection refused: 10.0.0.3:5432");
        let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 500);
        assert_eq!(body["message"], "internal server error");
        assert!(!body.to_string().contains("10.0.0.3"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::not_found("x").message(), "resource not found");
        assert_eq!(ApiError::MethodNotAllowed.message(), "method not allowed");
        assert_eq!(ApiError::unprocessable("x").message(), "unprocessable");
    }
}
