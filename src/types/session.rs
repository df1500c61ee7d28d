//! Session state: credential, document, and last answer

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::{DocumentView, ExtractedDocument};
use super::response::QaPair;

/// Where a session is in the credential -> document -> answer flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No credential yet; uploads and queries are rejected
    NeedsCredential,
    /// Credential set, no document yet
    NeedsDocument,
    /// Document extracted and ready for questions
    Ready,
    /// At least one question has been answered
    Answered,
}

impl SessionStatus {
    /// What the user should do next, or `None` once a question can simply
    /// be asked again
    pub fn next_action(&self) -> Option<&'static str> {
        match self {
            Self::NeedsCredential => Some("Enter your Google API Key to continue"),
            Self::NeedsDocument => Some("Upload a document to get started"),
            Self::Ready => Some("Ask a question about the document"),
            Self::Answered => None,
        }
    }
}

/// One user's working state
///
/// Everything here lives in memory only and vanishes when the session
/// is deleted or evicted.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session id
    pub id: Uuid,
    /// User-supplied model API key; never serialized
    pub credential: Option<String>,
    /// The currently loaded document, if any
    pub document: Option<ExtractedDocument>,
    /// The most recent question/answer pair, if any
    pub last_answer: Option<QaPair>,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last activity timestamp, used for idle eviction
    pub last_active: chrono::DateTime<chrono::Utc>,
}

impl Session {
    /// Create a fresh session
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4(),
            credential: None,
            document: None,
            last_answer: None,
            created_at: now,
            last_active: now,
        }
    }

    /// Bump the activity timestamp
    pub fn touch(&mut self) {
        self.last_active = chrono::Utc::now();
    }

    /// Current position in the flow
    pub fn status(&self) -> SessionStatus {
        if self.credential.is_none() {
            SessionStatus::NeedsCredential
        } else if self.document.is_none() {
            SessionStatus::NeedsDocument
        } else if self.last_answer.is_none() {
            SessionStatus::Ready
        } else {
            SessionStatus::Answered
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable snapshot of a session for API responses
///
/// Carries `has_credential` instead of the credential itself so the key
/// never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// Session id
    pub id: Uuid,
    /// Current position in the flow
    pub status: SessionStatus,
    /// Hint for the next required step, absent once answers are flowing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action: Option<&'static str>,
    /// Whether a credential is set
    pub has_credential: bool,
    /// Loaded document summary, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentView>,
    /// Most recent answer, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_answer: Option<QaPair>,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last activity timestamp
    pub last_active: chrono::DateTime<chrono::Utc>,
}

impl SessionView {
    /// Build a view from a session, previewing at most `preview_chars` characters
    pub fn from_session(session: &Session, preview_chars: usize) -> Self {
        let status = session.status();
        Self {
            id: session.id,
            status,
            next_action: status.next_action(),
            has_credential: session.credential.is_some(),
            document: session.document.as_ref().map(|d| d.view(preview_chars)),
            last_answer: session.last_answer.clone(),
            created_at: session.created_at,
            last_active: session.last_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::document::DocumentKind;

    #[test]
    fn test_status_progression() {
        let mut session = Session::new();
        assert_eq!(session.status(), SessionStatus::NeedsCredential);

        session.credential = Some("test-key".to_string());
        assert_eq!(session.status(), SessionStatus::NeedsDocument);

        session.document = Some(ExtractedDocument::new(
            "report.txt".to_string(),
            DocumentKind::Txt,
            "contents".to_string(),
            "hash".to_string(),
            None,
        ));
        assert_eq!(session.status(), SessionStatus::Ready);

        session.last_answer = Some(QaPair::new(
            "What is this?".to_string(),
            "A report.".to_string(),
            "gemini-1.5-flash-latest".to_string(),
            42,
        ));
        assert_eq!(session.status(), SessionStatus::Answered);
    }

    #[test]
    fn test_next_action_follows_status() {
        let mut session = Session::new();
        let view = SessionView::from_session(&session, 2000);
        assert_eq!(
            view.next_action,
            Some("Enter your Google API Key to continue")
        );

        session.credential = Some("test-key".to_string());
        let view = SessionView::from_session(&session, 2000);
        assert_eq!(view.next_action, Some("Upload a document to get started"));

        assert_eq!(SessionStatus::Answered.next_action(), None);
    }

    #[test]
    fn test_clearing_credential_regresses_status() {
        let mut session = Session::new();
        session.credential = Some("test-key".to_string());
        session.credential = None;
        assert_eq!(session.status(), SessionStatus::NeedsCredential);
    }

    #[test]
    fn test_view_hides_credential() {
        let mut session = Session::new();
        session.credential = Some("secret-key".to_string());

        let view = SessionView::from_session(&session, 2000);
        assert!(view.has_credential);

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("secret-key"));
    }
}
