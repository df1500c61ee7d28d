//! Extracted document types

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Supported document kinds, keyed by declared MIME type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Plain text file
    Txt,
}

impl DocumentKind {
    /// Detect document kind from a MIME type
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "text/plain" => Some(Self::Txt),
            _ => None,
        }
    }

    /// The canonical MIME type for this kind
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Txt => "text/plain",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::Txt => "Text File",
        }
    }
}

/// A document whose text has been extracted and is held in memory
///
/// The text lives behind an `Arc` so handlers can snapshot it out of a
/// session cheaply before awaiting the model call.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename as uploaded
    pub filename: String,
    /// Document kind
    pub kind: DocumentKind,
    /// Full extracted text, never truncated
    pub text: Arc<str>,
    /// Character count of the extracted text
    pub char_count: usize,
    /// Content hash of the extracted text
    pub content_hash: String,
    /// Total number of pages (PDFs only)
    pub total_pages: Option<u32>,
    /// Extraction timestamp
    pub extracted_at: chrono::DateTime<chrono::Utc>,
}

impl ExtractedDocument {
    /// Create a new extracted document
    pub fn new(
        filename: String,
        kind: DocumentKind,
        text: String,
        content_hash: String,
        total_pages: Option<u32>,
    ) -> Self {
        let char_count = text.chars().count();
        Self {
            filename,
            kind,
            text: Arc::from(text),
            char_count,
            content_hash,
            total_pages,
            extracted_at: chrono::Utc::now(),
        }
    }

    /// The first `max_chars` characters of the text, with a trailing
    /// ellipsis when the document continues past the cut
    pub fn preview(&self, max_chars: usize) -> (String, bool) {
        if self.char_count <= max_chars {
            return (self.text.to_string(), false);
        }
        let mut preview: String = self.text.chars().take(max_chars).collect();
        preview.push_str("...");
        (preview, true)
    }

    /// Render a serializable summary of this document
    pub fn view(&self, preview_chars: usize) -> DocumentView {
        let (preview, preview_truncated) = self.preview(preview_chars);
        DocumentView {
            filename: self.filename.clone(),
            kind: self.kind,
            char_count: self.char_count,
            content_hash: self.content_hash.clone(),
            total_pages: self.total_pages,
            extracted_at: self.extracted_at,
            preview,
            preview_truncated,
        }
    }
}

/// Serializable summary of an extracted document for API responses
#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    /// Original filename
    pub filename: String,
    /// Document kind
    pub kind: DocumentKind,
    /// Character count of the full text
    pub char_count: usize,
    /// Content hash of the full text
    pub content_hash: String,
    /// Total pages (PDFs only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    /// Extraction timestamp
    pub extracted_at: chrono::DateTime<chrono::Utc>,
    /// Leading slice of the text for display
    pub preview: String,
    /// Whether the preview was cut short
    pub preview_truncated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_text(text: &str) -> ExtractedDocument {
        ExtractedDocument::new(
            "notes.txt".to_string(),
            DocumentKind::Txt,
            text.to_string(),
            "hash".to_string(),
            None,
        )
    }

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(DocumentKind::from_mime("application/pdf"), Some(DocumentKind::Pdf));
        assert_eq!(
            DocumentKind::from_mime(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            Some(DocumentKind::Docx)
        );
        assert_eq!(DocumentKind::from_mime("text/plain"), Some(DocumentKind::Txt));
        assert_eq!(DocumentKind::from_mime("image/png"), None);
        assert_eq!(DocumentKind::from_mime("application/msword"), None);
    }

    #[test]
    fn test_preview_short_text_untouched() {
        let doc = doc_with_text("short text");
        let (preview, truncated) = doc.preview(2000);
        assert_eq!(preview, "short text");
        assert!(!truncated);
    }

    #[test]
    fn test_preview_truncates_with_ellipsis() {
        let doc = doc_with_text(&"a".repeat(3000));
        let (preview, truncated) = doc.preview(2000);
        assert_eq!(preview.chars().count(), 2003);
        assert!(preview.ends_with("..."));
        assert!(truncated);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        // Multibyte characters must not be split
        let doc = doc_with_text(&"é".repeat(100));
        let (preview, truncated) = doc.preview(10);
        assert_eq!(preview.chars().count(), 13);
        assert!(truncated);
    }

    #[test]
    fn test_char_count_is_chars_not_bytes() {
        let doc = doc_with_text("héllo");
        assert_eq!(doc.char_count, 5);
    }
}
