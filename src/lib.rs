//! doc-analyzer: Interactive document analysis with hosted-model question answering
//!
//! This crate provides a single-page document analyzer. Users upload a PDF, DOCX,
//! or plain-text file, supply their own model credential, and ask questions about
//! the extracted text. Answers come from Google's hosted Gemini API and can be
//! downloaded as a plain-text question/answer transcript.

pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod server;
pub mod types;

pub use config::AnalyzerConfig;
pub use error::{Error, Result};
pub use types::{
    document::{DocumentKind, DocumentView, ExtractedDocument},
    query::QueryRequest,
    response::QaPair,
    session::{Session, SessionStatus, SessionView},
};
