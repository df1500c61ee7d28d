//! Query endpoint: compose the prompt and call the hosted model

use axum::{
    extract::{Path, State},
    Json,
};
use std::time::Instant;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::llm::PresetQuestion;
use crate::server::state::AppState;
use crate::types::{QaPair, QueryRequest};

/// POST /api/sessions/:id/query - Ask a question about the uploaded document
///
/// One prompt, one model call, no retries. The stored answer replaces
/// the previous one.
pub async fn submit_query(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QaPair>> {
    let start = Instant::now();

    // Presets take precedence over free-form text
    let question = match request.preset.as_deref() {
        Some(preset_id) => PresetQuestion::find(preset_id)
            .ok_or_else(|| Error::incomplete(format!("unknown preset: {}", preset_id)))?
            .question
            .to_string(),
        None => request
            .question
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::incomplete("provide a question or a preset"))?,
    };

    tracing::info!("Query: \"{}\"", question);

    // Snapshot the credential and document text; the session guard must
    // not be held across the model call
    let (credential, text) = state.with_session(&id, |session| {
        let credential = session
            .credential
            .clone()
            .ok_or_else(|| Error::incomplete("no credential set for this session"))?;
        let document = session
            .document
            .as_ref()
            .ok_or_else(|| Error::incomplete("no document uploaded for this session"))?;
        Ok((credential, document.text.clone()))
    })?;

    let answer = state.model().answer(&credential, &text, &question).await?;

    let processing_time_ms = start.elapsed().as_millis() as u64;
    let qa = QaPair::new(
        question,
        answer,
        state.model().model().to_string(),
        processing_time_ms,
    );

    state.with_session_mut(&id, |session| {
        session.last_answer = Some(qa.clone());
        Ok(())
    })?;

    tracing::info!("Query completed in {}ms", processing_time_ms);

    Ok(Json(qa))
}
