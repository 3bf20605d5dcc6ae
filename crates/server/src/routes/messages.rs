//! Contact message route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{ApiResponse, Result};
use crate::state::AppState;
use crate::store::NewMessage;

/// Cooperation inquiry form data.
///
/// Absent fields deserialize as empty and fail validation in the store,
/// so a missing key reports the same 400 as an empty value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MessageForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Record a cooperation inquiry.
///
/// POST /send-message
///
/// The store validates the fields (non-empty, structurally valid email),
/// stamps the timestamp, and persists before this returns.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn send(
    State(state): State<AppState>,
    Json(form): Json<MessageForm>,
) -> Result<Json<ApiResponse>> {
    state
        .store()
        .add_message(NewMessage {
            name: form.name,
            email: form.email,
            message: form.message,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
