//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("Invalid input value")]
    InvalidInput(Vec<FieldError>),

    #[error("Invalid input value: {0}")]
    BadRequest(String),

    #[error("Too many requests")]
    TooManyRequests,

    // Post errors
    #[error("Post not found")]
    PostNotFound,

    #[error("Password does not match")]
    PasswordMismatch,

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// A single rejected request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Request field name
    #[schema(example = "title")]
    pub field: String,
    /// Why the value was rejected
    #[schema(example = "Title is required")]
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable machine-readable error code
    #[schema(example = "P001")]
    pub code: String,
    /// Human-readable description
    #[schema(example = "Post not found")]
    pub message: String,
    /// When the error was produced
    pub timestamp: DateTime<Utc>,
    /// Per-field validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) | AppError::BadRequest(_) => "C001",
            AppError::Database(_) | AppError::Internal(_) => "C002",
            AppError::TooManyRequests => "C003",
            AppError::PostNotFound => "P001",
            AppError::PasswordMismatch => "P002",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::PostNotFound => StatusCode::NOT_FOUND,
            AppError::PasswordMismatch => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::BadRequest(detail) => format!("Invalid input value - {}", detail),

            // Hide details for internal errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Internal server error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }

            other => {
                tracing::warn!(code = other.code(), "Business exception: {}", other);
                other.to_string()
            }
        }
    }

    /// Build the response body for this error
    pub fn to_body(&self) -> ErrorResponse {
        let errors = match self {
            AppError::InvalidInput(fields) => Some(fields.clone()),
            _ => None,
        };

        ErrorResponse {
            code: self.code().to_string(),
            message: self.user_message(),
            timestamp: Utc::now(),
            errors,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_body())).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::PostNotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code_mapping() {
        let cases = [
            (AppError::InvalidInput(vec![]), StatusCode::BAD_REQUEST, "C001"),
            (AppError::bad_request("x"), StatusCode::BAD_REQUEST, "C001"),
            (AppError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR, "C002"),
            (AppError::TooManyRequests, StatusCode::TOO_MANY_REQUESTS, "C003"),
            (AppError::PostNotFound, StatusCode::NOT_FOUND, "P001"),
            (AppError::PasswordMismatch, StatusCode::UNAUTHORIZED, "P002"),
        ];

        for (error, status, code) in cases {
            assert_eq!(error.status(), status);
            assert_eq!(error.code(), code);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let body = AppError::internal("connection refused at 10.0.0.3").to_body();
        assert_eq!(body.message, "Internal server error");
        assert!(body.errors.is_none());
    }

    #[test]
    fn test_invalid_input_carries_field_errors() {
        let body = AppError::InvalidInput(vec![FieldError::new("title", "Title is required")])
            .to_body();
        assert_eq!(body.code, "C001");
        assert_eq!(body.errors.unwrap()[0].field, "title");
    }

    #[test]
    fn test_bad_request_appends_detail() {
        let body = AppError::bad_request("missing field `title`").to_body();
        assert_eq!(body.message, "Invalid input value - missing field `title`");
    }

    #[test]
    fn test_error_body_omits_empty_errors() {
        let json = serde_json::to_value(AppError::PostNotFound.to_body()).unwrap();
        assert_eq!(json["code"], "P001");
        assert_eq!(json["message"], "Post not found");
        assert!(json.get("errors").is_none());
        assert!(json.get("timestamp").is_some());
    }
}
