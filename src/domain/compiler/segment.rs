// Segment builder: turns template tokens into segment descriptors

use std::collections::{HashMap, HashSet};

use crate::domain::route::{ParameterDefault, Route};
use crate::domain::template::TemplatePart;
use crate::error::RouteError;

const REQUIRED_VALUE: &str = "[^/]+";
const OPTIONAL_VALUE: &str = "[^/]*";

/// One placeholder plus its surrounding literal text, or a literal path piece
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    /// Parameter name; `None` for literal-only segments
    pub name: Option<String>,
    /// Regex fragment matching the segment's value
    pub pattern: String,
    pub optional: bool,
    pub before: String,
    pub after: String,
    /// No separator is synthesized between this segment and the next
    pub glued: bool,
    pub end: bool,
    /// Followed only by optional segments
    pub pre_end: bool,
}

impl Segment {
    fn literal(escaped: &str) -> Self {
        Self {
            pattern: escaped.to_string(),
            ..Self::default()
        }
    }

    fn parameter(name: &str, pattern: String, optional: bool, before: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            pattern,
            optional,
            before: before.to_string(),
            ..Self::default()
        }
    }
}

/// Segments of one route plus the defaults in effect after merging inline ones
#[derive(Debug)]
pub struct BuiltSegments {
    pub segments: Vec<Segment>,
    pub defaults: HashMap<String, ParameterDefault>,
}

/// Literal text between two placeholders, split on path separators
enum Gap<'a> {
    Adjacent,
    Glued(&'a str),
    Split {
        head: &'a str,
        middle: &'a str,
        tail: &'a str,
    },
}

fn split_gap(text: &str) -> Gap<'_> {
    if text.is_empty() {
        return Gap::Adjacent;
    }
    match (text.find('/'), text.rfind('/')) {
        (Some(first), Some(last)) => Gap::Split {
            head: &text[..first],
            middle: if first < last { &text[first + 1..last] } else { "" },
            tail: &text[last + 1..],
        },
        _ => Gap::Glued(text),
    }
}

/// Build segments for `route` from its escaped template tokens.
///
/// `query` feeds the query-string fallback: a parameter with a non-empty
/// query value may be absent from the path.
pub fn build_segments(
    route: &Route,
    parts: &[TemplatePart],
    query: &HashMap<String, String>,
) -> Result<BuiltSegments, RouteError> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut defaults = route.defaults.clone();
    let mut seen = HashSet::new();
    let mut pending = String::new();
    // Index of the last parameter segment
    let mut previous: Option<usize> = None;

    for part in parts {
        let placeholder = match part {
            TemplatePart::Literal(text) => {
                pending.push_str(text);
                continue;
            }
            TemplatePart::Placeholder(p) => p,
        };
        let name = placeholder.name.as_str();

        if !seen.insert(name.to_string()) {
            return Err(RouteError::DuplicateParameter {
                parameter: name.to_string(),
            });
        }

        if let Some(inline) = placeholder.default.to_parameter_default() {
            if route.defaults.contains_key(name) {
                return Err(RouteError::DefaultConflict {
                    parameter: name.to_string(),
                });
            }
            defaults.insert(name.to_string(), inline);
        }

        let before = match previous {
            None => attach_leading(&mut segments, &pending),
            Some(index) => match split_gap(&pending) {
                Gap::Adjacent => {
                    return Err(RouteError::AdjacentPlaceholders {
                        first: segments[index].name.clone().unwrap_or_default(),
                        second: name.to_string(),
                    })
                }
                Gap::Glued(text) => {
                    segments[index].glued = true;
                    text.to_string()
                }
                Gap::Split { head, middle, tail } => {
                    segments[index].after = head.to_string();
                    if !middle.is_empty() {
                        segments.push(Segment::literal(middle));
                    }
                    tail.to_string()
                }
            },
        };
        pending.clear();

        let optional = defaults.contains_key(name)
            || query.get(name).is_some_and(|value| !value.is_empty());
        let pattern = capture_pattern(route, name, optional)?;

        segments.push(Segment::parameter(name, pattern, optional, &before));
        previous = Some(segments.len() - 1);
    }

    match previous {
        None => segments.push(Segment::literal(&pending)),
        Some(index) => attach_trailing(&mut segments, index, &pending),
    }

    Ok(BuiltSegments { segments, defaults })
}

/// Text before the first placeholder; returns what stays as its `before`
fn attach_leading(segments: &mut Vec<Segment>, text: &str) -> String {
    match text.rfind('/') {
        Some(last) => {
            if last > 0 {
                segments.push(Segment::literal(&text[..last]));
            }
            text[last + 1..].to_string()
        }
        None => text.to_string(),
    }
}

/// Text after the last placeholder
fn attach_trailing(segments: &mut Vec<Segment>, index: usize, text: &str) {
    match text.find('/') {
        Some(first) => {
            segments[index].after = text[..first].to_string();
            let rest = &text[first + 1..];
            if !rest.is_empty() {
                segments.push(Segment::literal(rest));
            }
        }
        None => segments[index].after = text.to_string(),
    }
}

fn capture_pattern(route: &Route, name: &str, optional: bool) -> Result<String, RouteError> {
    match route.constraints.get(name) {
        Some(constraint) => {
            regex::Regex::new(constraint).map_err(|e| RouteError::InvalidConstraint {
                parameter: name.to_string(),
                reason: e.to_string(),
            })?;

            if optional {
                Ok(format!("(?P<{}>(?:{})|)", name, constraint))
            } else {
                Ok(format!("(?P<{}>(?:{}))", name, constraint))
            }
        }
        None => {
            let value = if optional { OPTIONAL_VALUE } else { REQUIRED_VALUE };
            Ok(format!("(?P<{}>{})", name, value))
        }
    }
}
