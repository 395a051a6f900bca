//! Template rendering

use crate::parser::{lex_tags, resolve_tag, value_to_string, Tag, TagIssue};
use crate::schema::*;
use crate::{Result, TemplateError};
use docx_core::{escape_xml, unescape_xml, DocxDocument};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Markup that ends the current text node, emits a line break and opens
/// a new text node in the same run
const LINE_BREAK: &str = r#"</w:t><w:br/><w:t xml:space="preserve">"#;

/// Characters of surrounding text kept in a diagnostic's context
const CONTEXT_CHARS: usize = 10;

/// A `<w:t>` element found in a part
struct TextNode {
    /// Byte range of the whole element in the part XML
    outer: Range<usize>,
    /// Decoded text content
    text: String,
    /// Scope the node belongs to (paragraph, or the node itself)
    scope: usize,
}

/// DOCX template renderer
///
/// Substitutes placeholder tags in every text-bearing part of a document
/// with values taken from a JSON object.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    options: TemplateOptions,
}

impl TemplateRenderer {
    /// Create a renderer with default options (`{{ }}`, paragraph scope, line breaks)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with explicit options
    pub fn with_options(options: TemplateOptions) -> Self {
        Self { options }
    }

    /// Set the tag delimiters
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.options.delimiters = delimiters;
        self
    }

    /// Enable or disable paragraph-wide tag resolution
    pub fn with_paragraph_scope(mut self, enabled: bool) -> Self {
        self.options.paragraph_scope = enabled;
        self
    }

    /// Enable or disable `\n` to `<w:br/>` conversion
    pub fn with_linebreaks(mut self, enabled: bool) -> Self {
        self.options.linebreaks = enabled;
        self
    }

    /// Current options
    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }

    /// Render the template with data
    ///
    /// Every text part is checked before any of them is written back, so on
    /// failure the document is left untouched and the error lists all tag
    /// problems across all parts.
    ///
    /// # Arguments
    /// * `doc` - DOCX document to render into
    /// * `data` - JSON object whose keys match the tag names
    pub fn render(&self, doc: &mut DocxDocument, data: &serde_json::Value) -> Result<()> {
        if !data.is_object() {
            return Err(TemplateError::BindingError(
                "template data must be a JSON object".to_string(),
            ));
        }

        let mut diagnostics = Vec::new();
        let mut rendered = Vec::new();

        for part in doc.text_parts() {
            let xml = doc.part_text(&part)?;
            let output = self.render_part(&part, xml, data, &mut diagnostics);
            rendered.push((part, output));
        }

        if !diagnostics.is_empty() {
            return Err(TemplateError::Render(diagnostics));
        }

        for (part, output) in rendered {
            if let Some(xml) = output {
                doc.set_part_text(&part, xml);
            }
        }

        Ok(())
    }

    /// Open template bytes, render them and return the new archive bytes
    pub fn render_bytes(&self, template: &[u8], data: &serde_json::Value) -> Result<Vec<u8>> {
        let mut doc = DocxDocument::open_from_bytes(template)?;
        self.render(&mut doc, data)?;
        Ok(doc.to_bytes()?)
    }

    /// Render a single part
    ///
    /// Returns `None` when the part contains no tags and can be kept as is.
    fn render_part(
        &self,
        file: &str,
        xml: &str,
        data: &serde_json::Value,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<String> {
        let nodes = self.collect_text_nodes(xml);
        let mut replacements: Vec<(Range<usize>, String)> = Vec::new();
        // Character offset of the current scope within the part's text
        let mut part_offset = 0;

        for scope in group_by_scope(&nodes) {
            let mut text = String::new();
            let mut bounds = Vec::with_capacity(scope.len());
            for node in scope {
                let start = text.len();
                text.push_str(&node.text);
                bounds.push(start..text.len());
            }

            let lexed = lex_tags(&text, &self.options.delimiters);

            for issue in &lexed.issues {
                diagnostics.push(self.issue_diagnostic(file, &text, part_offset, issue));
            }

            let mut values = Vec::with_capacity(lexed.tags.len());
            for tag in &lexed.tags {
                match resolve_tag(&tag.name, data) {
                    Some(value) => values.push(self.value_markup(&value_to_string(value))),
                    None => {
                        diagnostics.push(self.undefined_diagnostic(file, &text, part_offset, tag));
                        values.push(String::new());
                    }
                }
            }

            if !lexed.tags.is_empty() {
                for (node, range) in scope.iter().zip(&bounds) {
                    if let Some(content) = rewrite_node(&text, range, &lexed.tags, &values) {
                        replacements.push((
                            node.outer.clone(),
                            format!(r#"<w:t xml:space="preserve">{content}</w:t>"#),
                        ));
                    }
                }
            }

            part_offset += text.chars().count();
        }

        if replacements.is_empty() {
            return None;
        }

        let mut output = String::with_capacity(xml.len());
        let mut cursor = 0;
        for (range, markup) in replacements {
            output.push_str(&xml[cursor..range.start]);
            output.push_str(&markup);
            cursor = range.end;
        }
        output.push_str(&xml[cursor..]);

        Some(output)
    }

    /// Find every `<w:t>` element and assign it a scope
    fn collect_text_nodes(&self, xml: &str) -> Vec<TextNode> {
        let mut nodes = Vec::new();
        let mut paragraph = 0;

        for caps in text_node_regex().captures_iter(xml) {
            let Some(whole) = caps.get(0) else {
                continue;
            };

            match caps.get(1) {
                Some(content) => {
                    let scope = if self.options.paragraph_scope {
                        paragraph
                    } else {
                        nodes.len()
                    };
                    nodes.push(TextNode {
                        outer: whole.range(),
                        text: unescape_xml(content.as_str()),
                        scope,
                    });
                }
                None => paragraph += 1,
            }
        }

        nodes
    }

    /// Escape a value and apply line-break handling
    fn value_markup(&self, value: &str) -> String {
        if !self.options.linebreaks {
            return escape_xml(value);
        }

        value
            .split('\n')
            .map(escape_xml)
            .collect::<Vec<_>>()
            .join(LINE_BREAK)
    }

    fn issue_diagnostic(
        &self,
        file: &str,
        text: &str,
        part_offset: usize,
        issue: &TagIssue,
    ) -> Diagnostic {
        let delimiters = &self.options.delimiters;
        let explanation = match issue.kind {
            DiagnosticKind::UnopenedTag => {
                format!("The tag ending with \"{}{}\" is unopened", issue.raw, delimiters.end)
            }
            DiagnosticKind::UnclosedTag => {
                format!("The tag beginning with \"{}{}\" is unclosed", delimiters.start, issue.raw)
            }
            DiagnosticKind::DuplicateOpenTag => format!(
                "The tag beginning with \"{}{}\" has a duplicate open tag",
                delimiters.start, issue.raw
            ),
            DiagnosticKind::EmptyTag => "A tag has no name between its delimiters".to_string(),
            DiagnosticKind::UndefinedTag => format!("The tag \"{}\" is undefined", issue.raw),
        };

        let trimmed = issue.raw.trim();
        Diagnostic {
            explanation: Some(explanation),
            tag: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            context: Some(context(text, issue.start, issue.end)),
            file: Some(file.to_string()),
            part: Some(text[issue.start..issue.end].to_string()),
            offset: Some(part_offset + text[..issue.start].chars().count()),
            xtag: Some(issue.raw.clone()),
            ..Diagnostic::of_kind(issue.kind)
        }
    }

    fn undefined_diagnostic(
        &self,
        file: &str,
        text: &str,
        part_offset: usize,
        tag: &Tag,
    ) -> Diagnostic {
        Diagnostic {
            explanation: Some(format!(
                "The tag \"{}\" has no value in the supplied data",
                tag.name
            )),
            tag: Some(tag.name.clone()),
            context: Some(context(text, tag.start, tag.end)),
            file: Some(file.to_string()),
            part: Some(text[tag.start..tag.end].to_string()),
            offset: Some(part_offset + text[..tag.start].chars().count()),
            xtag: Some(tag.raw.clone()),
            ..Diagnostic::of_kind(DiagnosticKind::UndefinedTag)
        }
    }
}

/// Split nodes into runs of equal scope, preserving order
fn group_by_scope(nodes: &[TextNode]) -> Vec<&[TextNode]> {
    let mut groups = Vec::new();
    let mut start = 0;

    for i in 1..=nodes.len() {
        if i == nodes.len() || nodes[i].scope != nodes[start].scope {
            if start < i {
                groups.push(&nodes[start..i]);
            }
            start = i;
        }
    }

    groups
}

/// Compute the new escaped content of one node, or `None` if no tag touches it
///
/// A tag's value is written into the node holding its opening delimiter;
/// the rest of the tag is cut from whichever nodes it spans.
fn rewrite_node(text: &str, range: &Range<usize>, tags: &[Tag], values: &[String]) -> Option<String> {
    let mut content = String::new();
    let mut cursor = range.start;
    let mut touched = false;

    for (tag, value) in tags.iter().zip(values) {
        if tag.end <= range.start || tag.start >= range.end {
            continue;
        }
        touched = true;

        if tag.start > cursor {
            content.push_str(&escape_xml(&text[cursor..tag.start]));
        }
        if tag.start >= range.start {
            content.push_str(value);
        }
        cursor = cursor.max(tag.end.min(range.end));
    }

    if !touched {
        return None;
    }

    if cursor < range.end {
        content.push_str(&escape_xml(&text[cursor..range.end]));
    }

    Some(content)
}

/// Short excerpt around `start..end`
fn context(text: &str, start: usize, end: usize) -> String {
    let before: String = {
        let chars: Vec<char> = text[..start].chars().rev().take(CONTEXT_CHARS).collect();
        chars.into_iter().rev().collect()
    };
    let after: String = text[end..].chars().take(CONTEXT_CHARS).collect();
    format!("{before}{}{after}", &text[start..end])
}

fn text_node_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|</w:p>").expect("static regex is valid")
    })
}
