//! Text extraction from uploaded documents

mod parser;

pub use parser::DocumentParser;
