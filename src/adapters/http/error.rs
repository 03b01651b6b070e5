//! API error type and its HTTP mapping.
//!
//! Every failure leaves the API as `{ "code", "message", "details" }` with a
//! status derived from the error category.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, DomainError, ErrorCategory, ErrorCode};

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: HashMap<String, String>,
}

/// Error returned by every HTTP handler.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Rejects a malformed path or body field.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        DomainError::validation(field, message).into()
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        DomainError::new(ErrorCode::Unauthorized, message).into()
    }
}

fn status_for(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::Validation => StatusCode::BAD_REQUEST,
        ErrorCategory::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCategory::Forbidden => StatusCode::FORBIDDEN,
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::PreconditionFailed => StatusCode::CONFLICT,
        ErrorCategory::IncompleteScoring => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCategory::Storage => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self {
            status: status_for(err.category()),
            body: ErrorResponse {
                code: err.code.to_string(),
                message: err.message,
                details: err.details,
            },
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::ServiceUnavailable(_) => {
                DomainError::storage("Authentication service unavailable").into()
            }
            other => Self::unauthorized(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid("body", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
