//! The analysis prompt template and the preset questions

use serde::Serialize;

/// A canned analysis question offered by the UI
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PresetQuestion {
    /// Stable id used in query requests
    pub id: &'static str,
    /// Button label
    pub label: &'static str,
    /// The question sent to the model
    pub question: &'static str,
}

/// The six quick-analysis presets
pub const PRESET_QUESTIONS: &[PresetQuestion] = &[
    PresetQuestion {
        id: "summary",
        label: "\u{1F4CB} Summarize",
        question: "Provide a comprehensive summary of this document including the main points, key information, and important details.",
    },
    PresetQuestion {
        id: "key_points",
        label: "\u{1F50D} Key Points",
        question: "What are the key points, main findings, and most important information in this document?",
    },
    PresetQuestion {
        id: "risks",
        label: "\u{26A0}\u{FE0F} Risks & Issues",
        question: "What risks, challenges, problems, or issues are mentioned in this document?",
    },
    PresetQuestion {
        id: "recommendations",
        label: "\u{1F4A1} Recommendations",
        question: "What recommendations, suggestions, or proposed solutions are mentioned in this document?",
    },
    PresetQuestion {
        id: "technical_details",
        label: "\u{1F4CA} Technical Details",
        question: "What are the technical specifications, methodologies, or technical details mentioned in this document?",
    },
    PresetQuestion {
        id: "conclusions",
        label: "\u{1F3AF} Conclusions",
        question: "What are the conclusions, final thoughts, or outcomes mentioned in this document?",
    },
];

impl PresetQuestion {
    /// Look up a preset by id
    pub fn find(id: &str) -> Option<&'static PresetQuestion> {
        PRESET_QUESTIONS.iter().find(|p| p.id == id)
    }
}

/// Prompt builder for document analysis
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the analysis prompt, embedding the full document text and
    /// the user's question verbatim
    pub fn build_analysis_prompt(document_text: &str, question: &str) -> String {
        format!(
            r#"You are an intelligent document assistant. Given the following document content:

"{context}"

Answer the following user question as specifically and accurately as possible, using only the information from the document.

User question: {question}

Instructions:
- If the question asks for a summary, provide a comprehensive summary
- If the question asks for specific information, focus only on that information
- If the question asks about risks, focus on risks mentioned in the document
- If the question asks about recommendations, focus on recommendations
- If the information is not found in the document, clearly state "This information is not available in the provided document"
- Format your response clearly with appropriate headers and bullet points where helpful

Answer:"#,
            context = document_text,
            question = question
        )
    }
}
