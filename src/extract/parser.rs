//! MIME-dispatched document parser for PDF, DOCX, and plain text

use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::config::ExtractionConfig;
use crate::error::{Error, Result};
use crate::types::document::{DocumentKind, ExtractedDocument};

/// Extracts text from uploaded files
///
/// Dispatch is driven by the declared MIME type; the filename extension
/// only stands in when the upload carries no content type at all.
#[derive(Debug, Clone)]
pub struct DocumentParser {
    pdf_timeout: Duration,
}

impl DocumentParser {
    /// Create a parser from the extraction configuration
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            pdf_timeout: Duration::from_secs(config.pdf_timeout_secs),
        }
    }

    /// Extract the full text of an uploaded file
    pub fn extract(
        &self,
        filename: &str,
        declared_mime: Option<&str>,
        data: &[u8],
    ) -> Result<ExtractedDocument> {
        let mime = match declared_mime {
            // Strip parameters like "; charset=utf-8"
            Some(declared) => declared
                .split(';')
                .next()
                .unwrap_or(declared)
                .trim()
                .to_ascii_lowercase(),
            None => mime_guess::from_path(filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };

        let kind = DocumentKind::from_mime(&mime).ok_or_else(|| {
            Error::Extraction(format!(
                "unsupported file type: {} (supported: PDF, DOCX, TXT)",
                mime
            ))
        })?;

        if data.is_empty() {
            return Err(Error::Extraction("uploaded file is empty".to_string()));
        }

        let text = match kind {
            DocumentKind::Pdf => self.extract_pdf(data)?,
            DocumentKind::Docx => Self::extract_docx(data)?,
            DocumentKind::Txt => Self::extract_txt(data)?,
        };

        if text.trim().is_empty() {
            return Err(Error::Extraction(format!(
                "no text content could be extracted from the {}",
                kind.display_name()
            )));
        }

        let total_pages = match kind {
            DocumentKind::Pdf => lopdf::Document::load_mem(data)
                .ok()
                .map(|doc| doc.get_pages().len() as u32),
            _ => None,
        };

        let content_hash = hash_content(&text);

        Ok(ExtractedDocument::new(
            filename.to_string(),
            kind,
            text,
            content_hash,
            total_pages,
        ))
    }

    /// Extract PDF text with a sync timeout to prevent hangs on problematic fonts
    fn extract_pdf(&self, data: &[u8]) -> Result<String> {
        use std::sync::mpsc;
        use std::thread;

        // pdf-extract can hang or panic on malformed font tables; run it
        // on its own thread so the request fails cleanly instead
        let data_vec = data.to_vec();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = pdf_extract::extract_text_from_mem(&data_vec);
            let _ = tx.send(result);
        });

        let text = match rx.recv_timeout(self.pdf_timeout) {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                return Err(Error::Extraction(format!("could not read PDF: {}", e)));
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::error!(
                    "PDF extraction timed out after {}s - PDF may have complex fonts",
                    self.pdf_timeout.as_secs()
                );
                return Err(Error::Extraction(format!(
                    "PDF extraction timed out after {}s",
                    self.pdf_timeout.as_secs()
                )));
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(Error::Extraction(
                    "PDF extraction crashed, the file may be corrupt".to_string(),
                ));
            }
        };

        // Drop null characters and excess whitespace left behind by pdf-extract
        let text = text
            .replace('\0', "")
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(text)
    }

    /// Extract DOCX text, one line per paragraph
    fn extract_docx(data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data)
            .map_err(|e| Error::Extraction(format!("could not read DOCX: {}", e)))?;

        let mut content = String::new();
        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                for child in p.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                content.push_str(&t.text);
                            }
                        }
                    }
                }
                content.push('\n');
            }
        }

        Ok(content)
    }

    /// Decode a plain text file; invalid UTF-8 is rejected rather than repaired
    fn extract_txt(data: &[u8]) -> Result<String> {
        String::from_utf8(data.to_vec())
            .map_err(|e| Error::Extraction(format!("text file is not valid UTF-8: {}", e)))
    }
}

/// Hash extracted text for identification
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
