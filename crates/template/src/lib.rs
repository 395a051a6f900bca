//! Template Engine - placeholder substitution for DOCX templates
//!
//! This crate provides:
//! - Tag lexing with configurable delimiters (`{{name}}` by default)
//! - Substitution across the runs of a paragraph
//! - `\n` to line break conversion inside values
//! - Typed diagnostics for every tag that cannot be rendered
//!
//! # Example
//!
//! ```ignore
//! use docx_core::DocxDocument;
//! use template::TemplateRenderer;
//!
//! let mut doc = DocxDocument::open("templates/fieldtrip.docx")?;
//! let data = serde_json::json!({ "title": "校外学習のお知らせ" });
//! TemplateRenderer::new().render(&mut doc, &data)?;
//! let bytes = doc.to_bytes()?;
//! ```

pub mod parser;
mod renderer;
mod schema;

pub use parser::{lex_tags, Lexed, Tag, TagIssue};
pub use renderer::TemplateRenderer;
pub use schema::*;

use thiserror::Error;

/// Errors that can occur during template processing
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Invalid data binding: {0}")]
    BindingError(String),

    #[error("Render error: {}", summarize(.0))]
    Render(Vec<Diagnostic>),

    #[error("DOCX error: {0}")]
    DocxError(#[from] docx_core::DocxError),
}

impl TemplateError {
    /// Tag diagnostics carried by a render failure, empty for other errors
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            TemplateError::Render(diagnostics) => diagnostics,
            _ => &[],
        }
    }
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    match diagnostics {
        [single] => single.to_string(),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_single_message() {
        let mut diag = Diagnostic::of_kind(DiagnosticKind::UndefinedTag);
        diag.explanation = Some("The tag \"foo\" has no value in the supplied data".to_string());

        let err = TemplateError::Render(vec![diag]);
        assert_eq!(
            err.to_string(),
            "Render error: Undefined tag: The tag \"foo\" has no value in the supplied data"
        );
        assert_eq!(err.diagnostics().len(), 1);
    }

    #[test]
    fn test_render_error_multi_message() {
        let err = TemplateError::Render(vec![
            Diagnostic::of_kind(DiagnosticKind::UnclosedTag),
            Diagnostic::of_kind(DiagnosticKind::UnopenedTag),
        ]);
        assert_eq!(
            err.to_string(),
            "Render error: 2 errors: Unclosed tag; Unopened tag"
        );
    }

    #[test]
    fn test_non_render_error_has_no_diagnostics() {
        let err = TemplateError::BindingError("x".to_string());
        assert!(err.diagnostics().is_empty());
    }
}
