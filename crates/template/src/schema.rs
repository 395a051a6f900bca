//! Template configuration and diagnostic types

use serde::{Deserialize, Serialize};

/// Tag delimiters used when authoring a template
///
/// A deployment uses exactly one convention for every template it renders.
/// Double braces (`{{name}}`) are the default; single braces (`{name}`)
/// are available for templates authored against that convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    /// Opening delimiter
    pub start: String,
    /// Closing delimiter
    pub end: String,
}

impl Delimiters {
    /// Create custom delimiters
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// `{{name}}`
    pub fn double_brace() -> Self {
        Self::new("{{", "}}")
    }

    /// `{name}`
    pub fn single_brace() -> Self {
        Self::new("{", "}")
    }

    /// Wrap a tag name in these delimiters
    pub fn wrap(&self, name: &str) -> String {
        format!("{}{}{}", self.start, name, self.end)
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::double_brace()
    }
}

/// Rendering options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateOptions {
    /// Tag delimiters
    #[serde(default)]
    pub delimiters: Delimiters,

    /// Resolve tags across all runs of a paragraph
    ///
    /// Word splits typed text into several runs whenever formatting,
    /// spell-check or revision marks change, so a tag is rarely contained
    /// in a single `<w:t>`. When disabled every `<w:t>` is scanned alone.
    #[serde(default = "default_true")]
    pub paragraph_scope: bool,

    /// Turn `\n` inside values into `<w:br/>` line breaks
    #[serde(default = "default_true")]
    pub linebreaks: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            paragraph_scope: true,
            linebreaks: true,
        }
    }
}

/// Kind of tag failure found while rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Closing delimiter without an opening one
    UnopenedTag,
    /// Opening delimiter never closed within its scope
    UnclosedTag,
    /// Opening delimiter found while another tag is still open
    DuplicateOpenTag,
    /// Delimiters with nothing but whitespace between them
    EmptyTag,
    /// Tag name not present in the supplied data
    UndefinedTag,
}

impl DiagnosticKind {
    /// Stable machine-readable identifier
    pub fn id(self) -> &'static str {
        match self {
            DiagnosticKind::UnopenedTag => "unopened_tag",
            DiagnosticKind::UnclosedTag => "unclosed_tag",
            DiagnosticKind::DuplicateOpenTag => "duplicate_open_tag",
            DiagnosticKind::EmptyTag => "empty_tag",
            DiagnosticKind::UndefinedTag => "undefined_tag",
        }
    }

    /// Error class: syntax problems vs. data problems
    pub fn name(self) -> &'static str {
        match self {
            DiagnosticKind::UndefinedTag => "RenderingError",
            _ => "TemplateError",
        }
    }

    /// Short human-readable message
    pub fn message(self) -> &'static str {
        match self {
            DiagnosticKind::UnopenedTag => "Unopened tag",
            DiagnosticKind::UnclosedTag => "Unclosed tag",
            DiagnosticKind::DuplicateOpenTag => "Duplicate open tag",
            DiagnosticKind::EmptyTag => "Empty tag",
            DiagnosticKind::UndefinedTag => "Undefined tag",
        }
    }
}

/// One tag failure, as reported to API callers
///
/// Every field is optional so the JSON body only carries what the engine
/// actually knows about the failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Trimmed tag name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Text surrounding the failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Archive part, e.g. `word/document.xml`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Raw tag including delimiters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
    /// Character offset in the part's text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Raw text between the delimiters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xtag: Option<String>,
}

impl Diagnostic {
    /// Start a diagnostic of the given kind
    pub fn of_kind(kind: DiagnosticKind) -> Self {
        Self {
            message: Some(kind.message().to_string()),
            name: Some(kind.name().to_string()),
            id: Some(kind.id().to_string()),
            ..Self::default()
        }
    }

    /// Identifier, if any
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = self.message.as_deref().unwrap_or("Template error");
        match &self.explanation {
            Some(explanation) => write!(f, "{message}: {explanation}"),
            None => write!(f, "{message}"),
        }
    }
}
