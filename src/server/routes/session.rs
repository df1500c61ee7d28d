//! Session lifecycle endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::SessionView;

/// POST /api/sessions - Start a new session
pub async fn create_session(State(state): State<AppState>) -> Result<Json<SessionView>> {
    let id = state.create_session();
    tracing::info!("Session {} created", id);
    Ok(Json(state.session_view(&id)?))
}

/// GET /api/sessions/:id - Current session status
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    Ok(Json(state.session_view(&id)?))
}

/// DELETE /api/sessions/:id - Discard a session and everything it holds
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state.remove_session(&id)?;
    tracing::info!("Session {} deleted", id);
    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// Request body for credential updates
#[derive(Debug, Deserialize)]
pub struct CredentialRequest {
    /// The model API key; an empty string clears the credential
    pub credential: String,
}

/// PUT /api/sessions/:id/credential - Set or clear the model API key
///
/// Changing the key leaves any loaded document and answer in place.
pub async fn set_credential(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CredentialRequest>,
) -> Result<Json<SessionView>> {
    state.with_session_mut(&id, |session| {
        let trimmed = request.credential.trim();
        session.credential = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        Ok(())
    })?;

    Ok(Json(state.session_view(&id)?))
}
