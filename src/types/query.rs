//! Query request types

use serde::{Deserialize, Serialize};

/// Request body for submitting a question
///
/// Exactly one of `preset` or `question` is expected; when both are
/// present the preset wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Free-form question text
    #[serde(default)]
    pub question: Option<String>,
    /// Preset question id (see `GET /api/presets`)
    #[serde(default)]
    pub preset: Option<String>,
}

impl QueryRequest {
    /// Create a free-form question request
    pub fn question(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            preset: None,
        }
    }

    /// Create a preset request
    pub fn preset(preset_id: impl Into<String>) -> Self {
        Self {
            question: None,
            preset: Some(preset_id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_question_only() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"question": "What is the budget?"}"#).unwrap();
        assert_eq!(request.question.as_deref(), Some("What is the budget?"));
        assert!(request.preset.is_none());
    }

    #[test]
    fn test_deserialize_preset_only() {
        let request: QueryRequest = serde_json::from_str(r#"{"preset": "risks"}"#).unwrap();
        assert_eq!(request.preset.as_deref(), Some("risks"));
        assert!(request.question.is_none());
    }

    #[test]
    fn test_deserialize_empty_body() {
        let request: QueryRequest = serde_json::from_str("{}").unwrap();
        assert!(request.question.is_none());
        assert!(request.preset.is_none());
    }
}
