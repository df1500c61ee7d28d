//! API routes for the document analyzer

pub mod document;
pub mod download;
pub mod query;
pub mod session;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::llm::PRESET_QUESTIONS;
use crate::server::state::AppState;
use crate::types::DocumentKind;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Session lifecycle
        .route("/sessions", post(session::create_session))
        .route(
            "/sessions/:id",
            get(session::get_session).delete(session::delete_session),
        )
        .route("/sessions/:id/credential", put(session::set_credential))
        // Upload - with larger body limit for document files
        .route(
            "/sessions/:id/document",
            post(document::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Analysis
        .route("/sessions/:id/query", post(query::submit_query))
        .route("/sessions/:id/download", get(download::download_answer))
        // Static metadata
        .route("/presets", get(presets))
        .route("/info", get(info))
}

/// Preset question catalog, rendered as analysis buttons by the UI
async fn presets() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "presets": PRESET_QUESTIONS }))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "doc-analyzer",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Interactive document analyzer with hosted-model question answering",
        "endpoints": {
            "POST /api/sessions": "Create an analysis session",
            "GET /api/sessions/:id": "Get session status",
            "DELETE /api/sessions/:id": "Discard a session",
            "PUT /api/sessions/:id/credential": "Set or clear the model credential",
            "POST /api/sessions/:id/document": "Upload a document (multipart `file` field)",
            "POST /api/sessions/:id/query": "Ask a question about the document",
            "GET /api/sessions/:id/download": "Download the last answer as text",
            "GET /api/presets": "List preset analysis questions"
        },
        "supported_types": [
            DocumentKind::Pdf.mime_type(),
            DocumentKind::Docx.mime_type(),
            DocumentKind::Txt.mime_type(),
        ],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_presets_lists_all_six() {
        let axum::Json(body) = presets().await;
        let entries = body["presets"].as_array().unwrap();
        assert_eq!(entries.len(), 6);
        assert!(entries.iter().any(|p| p["id"] == "summary"));
        assert!(entries.iter().any(|p| p["id"] == "risks"));
    }

    #[tokio::test]
    async fn test_info_names_supported_types() {
        let axum::Json(body) = info().await;
        let types = body["supported_types"].as_array().unwrap();
        assert_eq!(types.len(), 3);
        assert!(types.contains(&serde_json::json!("application/pdf")));
        assert!(types.contains(&serde_json::json!("text/plain")));
    }
}
