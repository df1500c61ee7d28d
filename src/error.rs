//! Error types for the document analyzer

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias using the analyzer error
pub type Result<T> = std::result::Result<T, Error>;

/// All the ways an analyzer operation can fail
#[derive(Debug, Error)]
pub enum Error {
    /// Text extraction failed: corrupt bytes, unrecognized type, or an empty result
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// The hosted model call failed: network, credential, quota, or upstream error
    #[error("model call failed: {0}")]
    ModelCall(String),

    /// An operation ran before its preconditions were met
    #[error("{0}")]
    IncompleteState(String),

    /// Unknown session id
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Extraction failure with a message
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Model call failure with a message
    pub fn model_call(msg: impl Into<String>) -> Self {
        Self::ModelCall(msg.into())
    }

    /// Precondition failure with a message
    pub fn incomplete(msg: impl Into<String>) -> Self {
        Self::IncompleteState(msg.into())
    }

    /// Stable machine-readable label for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Extraction(_) => "extraction_failure",
            Self::ModelCall(_) => "model_call_failure",
            Self::IncompleteState(_) => "incomplete_state",
            Self::SessionNotFound(_) => "session_not_found",
            Self::Config(_) => "config_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for the error kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ModelCall(_) => StatusCode::BAD_GATEWAY,
            Self::IncompleteState(_) => StatusCode::BAD_REQUEST,
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let body = Json(serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
