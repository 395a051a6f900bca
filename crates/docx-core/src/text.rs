//! WordprocessingML text helpers

use regex::Regex;
use std::sync::OnceLock;

/// Escape text for use inside a `<w:t>` element
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Decode the predefined XML entities and numeric character references
///
/// Unknown or malformed references are kept verbatim.
pub fn unescape_xml(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let decoded = tail
            .find(';')
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|ch| (ch, semi)));

        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or(name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

/// Extract the visible text of a WordprocessingML part as lines
///
/// Every paragraph ends a line and every `<w:br/>` starts a new one.
/// `<w:tab/>` becomes a tab character.
pub fn plain_text_lines(xml: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for caps in text_token_regex().captures_iter(xml) {
        if let Some(text) = caps.get(1) {
            current.push_str(&unescape_xml(text.as_str()));
            continue;
        }

        let token = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        if token.starts_with("<w:br") {
            lines.push(std::mem::take(&mut current));
        } else if token == "<w:tab/>" {
            current.push('\t');
        } else {
            // paragraph end
            lines.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn text_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:br(?:\s[^>]*)?/>|<w:tab/>|</w:p>|<w:p(?:\s[^>]*)?/>",
        )
        .expect("static regex is valid")
    })
}
