//! Unified error handling for the HTTP surface.
//!
//! Provides a unified `AppError` type that maps every failure in the system
//! to a `{success: false, message}` JSON body with the appropriate status
//! code. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::upload::UploadError;
use crate::store::StoreError;

/// Standard JSON response body for mutations and errors.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    /// A bare `{success: true}` body.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// A `{success: false, message}` body.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed (validation, missing record, or persistence).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// File upload failed.
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Request input failed validation before reaching the store.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Login attempt with a wrong credential pair.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Non-admin session attempting a gated operation.
    #[error("Forbidden")]
    Forbidden,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Session-layer failures are internal: the client can do nothing about them.
    #[must_use]
    pub fn session(err: tower_sessions::session::Error) -> Self {
        Self::Internal(format!("session error: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Store(err) => match err {
                StoreError::Validation(_) => StatusCode::BAD_REQUEST,
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::Io(_) | StoreError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Upload(err) => match err {
                UploadError::TooManyFiles { .. } => StatusCode::BAD_REQUEST,
                UploadError::MissingFileName | UploadError::WriteFailed(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request error");
        }

        // Don't expose internal error details to clients
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            match &self {
                Self::Store(err) => err.to_string(),
                Self::Upload(err) => err.to_string(),
                Self::Validation(msg) => msg.clone(),
                Self::NotFound(what) => format!("{what} not found"),
                Self::InvalidCredentials => "Invalid username or password".to_string(),
                Self::Forbidden => "Access denied".to_string(),
                Self::Internal(_) => unreachable!("internal errors handled above"),
            }
        };

        (status, Json(ApiResponse::failure(message))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Validation("missing field".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(get_status(AppError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_status_codes() {
        assert_eq!(
            get_status(AppError::Store(StoreError::Validation(
                "name is required".to_string()
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Store(StoreError::NotFound(
                "product".to_string()
            ))),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_upload_error_status_codes() {
        assert_eq!(
            get_status(AppError::Upload(UploadError::TooManyFiles { count: 6 })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Upload(UploadError::WriteFailed(
                std::io::Error::other("disk full")
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_not_leaked() {
        let response =
            AppError::Internal("secret backend detail".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_api_response_shape() {
        let ok = serde_json::to_value(ApiResponse::ok()).expect("serialize");
        assert_eq!(ok, serde_json::json!({"success": true}));

        let failed = serde_json::to_value(ApiResponse::failure("nope")).expect("serialize");
        assert_eq!(
            failed,
            serde_json::json!({"success": false, "message": "nope"})
        );
    }
}
