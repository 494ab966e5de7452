// Pattern assembler and matcher

use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

use super::segment::Segment;
use crate::domain::template::unescape;

const SEPARATOR: &str = "/";
const OPTIONAL_SEPARATOR: &str = "/?";
// Before a trailing optional run the separator may only be dropped at the end
const PRE_END_SEPARATOR: &str = "(?:/|$)";

/// Anchored pattern source plus a literal outline of the template
#[derive(Debug, Clone, PartialEq)]
pub struct Assembled {
    pub pattern: String,
    pub outline: String,
}

/// Concatenate segment patterns with the separators implied by their borders
pub fn assemble(segments: &[Segment], query: &HashMap<String, String>) -> Assembled {
    let mut pattern = String::new();
    let mut outline = String::new();

    for segment in segments {
        if !segment.before.is_empty() {
            pattern.push_str(&segment.before);
            outline.push_str(&unescape(&segment.before));
        }

        pattern.push_str(&segment.pattern);
        match &segment.name {
            Some(name) => match query.get(name).filter(|v| !v.is_empty()) {
                Some(value) => outline.push_str(value),
                None => {
                    outline.push('{');
                    outline.push_str(name);
                    outline.push('}');
                }
            },
            None => outline.push_str(&unescape(&segment.pattern)),
        }

        if !segment.after.is_empty() {
            pattern.push_str(&segment.after);
            outline.push_str(&unescape(&segment.after));
        }

        if !segment.glued {
            let separator = if segment.pre_end && !segment.optional {
                PRE_END_SEPARATOR
            } else if segment.optional || segment.end || segment.pre_end {
                OPTIONAL_SEPARATOR
            } else {
                SEPARATOR
            };
            pattern.push_str(separator);
            outline.push('/');
        }
    }

    Assembled {
        pattern: format!("^{}$", pattern),
        outline: outline.trim_end_matches('/').to_string(),
    }
}

/// Build the case-insensitive regex for an assembled pattern
pub fn build_regex(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
}

/// Match a normalized, still percent-encoded path in a single attempt.
///
/// Captured values are percent-decoded after matching, so an encoded `/` or
/// `?` stays inside its segment. A capture that does not decode to UTF-8
/// fails the match. Empty captures are left out; a non-empty query value
/// (already decoded) stands in for them.
pub fn match_path(
    regex: &Regex,
    segments: &[Segment],
    path: &str,
    query: &HashMap<String, String>,
) -> Option<HashMap<String, String>> {
    let captures = regex.captures(path)?;
    let mut values = HashMap::new();

    for name in segments.iter().filter_map(|s| s.name.as_deref()) {
        let captured = captures
            .name(name)
            .map(|m| m.as_str())
            .filter(|v| !v.is_empty());

        let value = match captured {
            Some(raw) => urlencoding::decode(raw).ok()?.into_owned(),
            None => match query.get(name).filter(|v| !v.is_empty()) {
                Some(fallback) => fallback.clone(),
                None => continue,
            },
        };
        values.insert(name.to_string(), value);
    }

    Some(values)
}
