//! Core types for the document analyzer

pub mod document;
pub mod query;
pub mod response;
pub mod session;

pub use document::{DocumentKind, DocumentView, ExtractedDocument};
pub use query::QueryRequest;
pub use response::QaPair;
pub use session::{Session, SessionStatus, SessionView};
