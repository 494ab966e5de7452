// Escapes literal template text for inclusion in a regex

use anyhow::Result;

use super::ast::{Template, TemplatePart};
use super::parser::TemplateParser;

/// Escape every literal run of a parsed template, leaving placeholders as-is
pub fn escape_parts(template: &Template) -> Vec<TemplatePart> {
    template
        .parts
        .iter()
        .filter_map(|part| match part {
            TemplatePart::Literal(text) if text.is_empty() => None,
            TemplatePart::Literal(text) => Some(TemplatePart::Literal(regex::escape(text))),
            TemplatePart::Placeholder(p) => Some(TemplatePart::Placeholder(p.clone())),
        })
        .collect()
}

/// Escape a raw template string.
///
/// Literal text is escaped for the pattern engine; placeholder tokens are
/// written back in their `{...}` form, in the original order.
pub fn escape_template(template: &str) -> Result<String> {
    let parsed = TemplateParser::parse(template)?;

    Ok(escape_parts(&parsed)
        .iter()
        .map(|part| match part {
            TemplatePart::Literal(text) => text.clone(),
            TemplatePart::Placeholder(p) => p.to_string(),
        })
        .collect())
}

/// Reverse `regex::escape` for diagnostic output
pub fn unescape(escaped: &str) -> String {
    let mut result = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                result.push(next);
            }
        } else {
            result.push(ch);
        }
    }

    result
}
