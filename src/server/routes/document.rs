//! Document upload and extraction endpoint

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::time::Instant;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::SessionView;

/// POST /api/sessions/:id/document - Upload a file and extract its text
///
/// Expects a multipart body with a `file` field. A successful upload
/// replaces the session's document and clears the previous answer; a
/// failed extraction leaves the session untouched.
pub async fn upload_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<SessionView>> {
    // A credential must be in place before a document is accepted
    state.with_session(&id, |session| {
        if session.credential.is_none() {
            return Err(Error::incomplete(
                "set a credential before uploading a document",
            ));
        }
        Ok(())
    })?;

    let start = Instant::now();
    let mut upload: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Internal(format!("failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("upload_{}", Uuid::new_v4()));
        let declared_mime = field.content_type().map(|s| s.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Internal(format!("failed to read file: {}", e)))?;

        upload = Some((filename, declared_mime, data.to_vec()));
        break;
    }

    let (filename, declared_mime, data) =
        upload.ok_or_else(|| Error::incomplete("multipart body must include a `file` field"))?;

    tracing::info!("Processing file: {} ({} bytes)", filename, data.len());

    let document = state
        .parser()
        .extract(&filename, declared_mime.as_deref(), &data)?;

    tracing::info!(
        "Extracted '{}': {} chars in {:.1}s",
        document.filename,
        document.char_count,
        start.elapsed().as_secs_f64()
    );

    // A new document replaces the previous one and clears the last answer
    state.with_session_mut(&id, |session| {
        session.document = Some(document);
        session.last_answer = None;
        Ok(())
    })?;

    Ok(Json(state.session_view(&id)?))
}
