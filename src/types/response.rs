//! Answer types

use serde::{Deserialize, Serialize};

/// One answered question, stored on the session and returned from the
/// query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    /// The question as sent to the model
    pub question: String,
    /// The model's full answer text
    pub answer: String,
    /// Which model produced the answer
    pub model: String,
    /// End-to-end processing time in milliseconds
    pub processing_time_ms: u64,
    /// When the answer arrived
    pub answered_at: chrono::DateTime<chrono::Utc>,
}

impl QaPair {
    /// Create a new question/answer pair stamped with the current time
    pub fn new(question: String, answer: String, model: String, processing_time_ms: u64) -> Self {
        Self {
            question,
            answer,
            model,
            processing_time_ms,
            answered_at: chrono::Utc::now(),
        }
    }

    /// Plain-text layout used for the downloadable result file
    pub fn download_text(&self) -> String {
        format!("Question: {}\n\nAnswer:\n{}", self.question, self.answer)
    }
}
