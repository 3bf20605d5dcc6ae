//! Admin login, logout, and session-status route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{ApiResponse, AppError, Result};
use crate::middleware::{is_admin, set_admin};
use crate::state::AppState;

/// Login form data.
///
/// Absent fields deserialize as empty and never match the configured
/// credentials, so a missing key reports the same 401 as a wrong value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for the admin-status check.
#[derive(Debug, Serialize)]
pub struct CheckAdminResponse {
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// Log in as the admin.
///
/// POST /login
///
/// Compares the submitted pair against the configured credentials
/// (exact-string equality, no hashing - single fixed admin account) and
/// marks the session on success.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginRequest>,
) -> Result<Json<ApiResponse>> {
    if !state.config().admin.matches(&form.username, &form.password) {
        tracing::warn!("Failed admin login attempt");
        return Err(AppError::InvalidCredentials);
    }

    set_admin(&session).await.map_err(AppError::session)?;
    tracing::info!("Admin logged in");
    Ok(Json(ApiResponse::ok()))
}

/// Log out, destroying the whole session (not just the flag).
///
/// GET /logout
pub async fn logout(session: Session) -> Result<Json<ApiResponse>> {
    session.flush().await.map_err(AppError::session)?;
    tracing::info!("Session destroyed");
    Ok(Json(ApiResponse::ok()))
}

/// Report whether the current session is an admin session.
///
/// GET /check-admin
pub async fn check_admin(session: Session) -> Json<CheckAdminResponse> {
    Json(CheckAdminResponse {
        is_admin: is_admin(&session).await,
    })
}
