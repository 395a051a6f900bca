//! Tag lexing and data binding

use crate::schema::{Delimiters, DiagnosticKind};

/// A well-formed tag found in template text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Trimmed name used for lookup
    pub name: String,
    /// Text between the delimiters, untrimmed
    pub raw: String,
    /// Byte offset of the opening delimiter
    pub start: usize,
    /// Byte offset just past the closing delimiter
    pub end: usize,
}

/// A syntax problem found while lexing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagIssue {
    pub kind: DiagnosticKind,
    /// Text between the delimiters (or up to the stray delimiter)
    pub raw: String,
    /// Byte range covered by the problem
    pub start: usize,
    pub end: usize,
}

/// Result of lexing one scope of text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexed {
    pub tags: Vec<Tag>,
    pub issues: Vec<TagIssue>,
}

/// Find every tag in `text`
///
/// Lexing never fails; malformed delimiters are collected as issues so a
/// caller can report all of them at once.
pub fn lex_tags(text: &str, delimiters: &Delimiters) -> Lexed {
    let start_delim = delimiters.start.as_str();
    let end_delim = delimiters.end.as_str();

    let mut lexed = Lexed::default();
    if start_delim.is_empty() || end_delim.is_empty() {
        return lexed;
    }

    let mut open: Option<usize> = None;
    // End of the last tag or issue, used to bound unopened-tag text
    let mut boundary = 0;
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];

        if rest.starts_with(start_delim) {
            if let Some(prev) = open {
                lexed.issues.push(TagIssue {
                    kind: DiagnosticKind::DuplicateOpenTag,
                    raw: text[prev + start_delim.len()..i].to_string(),
                    start: prev,
                    end: i,
                });
            }
            open = Some(i);
            i += start_delim.len();
            continue;
        }

        if rest.starts_with(end_delim) {
            let end = i + end_delim.len();
            match open.take() {
                Some(s) => {
                    let raw = &text[s + start_delim.len()..i];
                    let name = raw.trim();
                    if name.is_empty() {
                        lexed.issues.push(TagIssue {
                            kind: DiagnosticKind::EmptyTag,
                            raw: raw.to_string(),
                            start: s,
                            end,
                        });
                    } else {
                        lexed.tags.push(Tag {
                            name: name.to_string(),
                            raw: raw.to_string(),
                            start: s,
                            end,
                        });
                    }
                }
                None => lexed.issues.push(TagIssue {
                    kind: DiagnosticKind::UnopenedTag,
                    raw: text[boundary..i].to_string(),
                    start: i,
                    end,
                }),
            }
            boundary = end;
            i = end;
            continue;
        }

        i += rest.chars().next().map(char::len_utf8).unwrap_or(1);
    }

    if let Some(s) = open {
        lexed.issues.push(TagIssue {
            kind: DiagnosticKind::UnclosedTag,
            raw: text[s + start_delim.len()..].to_string(),
            start: s,
            end: text.len(),
        });
    }

    lexed
}

/// Resolve a tag name against data
///
/// Supports simple paths like:
/// - `field` - Root field
/// - `object.field` - Nested field
/// - `array[0]` - Array index
/// - `array[0].field` - Array element field
pub fn resolve_tag<'a>(name: &str, data: &'a serde_json::Value) -> Option<&'a serde_json::Value> {
    let mut current = data;

    for segment in name.split('.') {
        // Check for array index
        if let Some(bracket_pos) = segment.find('[') {
            let field = &segment[..bracket_pos];
            let index_str = segment[bracket_pos + 1..].strip_suffix(']')?;
            let index: usize = index_str.parse().ok()?;

            if !field.is_empty() {
                current = current.get(field)?;
            }
            current = current.get(index)?;
        } else {
            current = current.get(segment)?;
        }
    }

    Some(current)
}

/// Convert a JSON value to string for rendering
pub fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => value.to_string(),
    }
}
