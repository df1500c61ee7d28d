//! Answer download endpoint.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;

/// Filename suggested to the browser for the downloaded answer.
pub const DOWNLOAD_FILENAME: &str = "document_analysis.txt";

/// GET /api/sessions/:id/download
///
/// Returns the most recent question/answer pair as a plain-text
/// attachment. Fails with `incomplete_state` until a query has
/// completed for the session.
pub async fn download_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let body = state.with_session(&id, |session| {
        session
            .last_answer
            .as_ref()
            .map(|qa| qa.download_text())
            .ok_or_else(|| Error::incomplete("no answer to download yet"))
    })?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "text/plain; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
        ),
    ];

    Ok((headers, body))
}
