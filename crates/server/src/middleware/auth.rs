//! Authorization middleware and extractors.
//!
//! Provides the extractor that gates mutating admin endpoints on the
//! session's admin flag, plus helpers for reading and setting that flag.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::error::ApiResponse;
use crate::models::session_keys;

/// Extractor that requires an admin session.
///
/// Rejects with 403 before the handler body runs, so no store mutation or
/// upload work happens for non-admin requests.
///
/// # Example
///
/// ```rust,ignore
/// async fn delete_product(
///     _admin: RequireAdmin,
///     State(state): State<AppState>,
/// ) -> Result<Json<ApiResponse>> { /* ... */ }
/// ```
pub struct RequireAdmin;

/// Rejection returned when the session is not an admin session.
pub struct AdminRejection;

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::failure("Access denied")),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminRejection)?;

        if is_admin(session).await {
            Ok(Self)
        } else {
            Err(AdminRejection)
        }
    }
}

/// Read the admin flag; an absent flag or destroyed session means non-admin.
pub async fn is_admin(session: &Session) -> bool {
    session
        .get::<bool>(session_keys::IS_ADMIN)
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}

/// Mark the current session as an admin session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::IS_ADMIN, true).await
}
