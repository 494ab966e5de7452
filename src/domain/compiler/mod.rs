// Route compiler: template -> segments -> anchored regex
//
// Compilation runs once when a route is registered, to surface configuration
// errors, and again on every match attempt. Nothing is cached between calls.

mod borders;
mod pattern;
mod segment;

pub use borders::resolve_borders;
pub use pattern::{assemble, build_regex, match_path, Assembled};
pub use segment::{build_segments, BuiltSegments, Segment};

use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

use crate::domain::route::{ParameterDefault, Route};
use crate::domain::template::{escape_parts, TemplateParser};
use crate::error::RouteError;

/// A route compiled against one request's query string
#[derive(Debug)]
pub struct CompiledRoute {
    regex: Regex,
    segments: Vec<Segment>,
    defaults: HashMap<String, ParameterDefault>,
    outline: String,
}

impl CompiledRoute {
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Route defaults with inline defaults merged in
    pub fn defaults(&self) -> &HashMap<String, ParameterDefault> {
        &self.defaults
    }

    pub fn outline(&self) -> &str {
        &self.outline
    }

    pub fn into_defaults(self) -> HashMap<String, ParameterDefault> {
        self.defaults
    }

    /// Match an already normalized path
    pub fn match_path(&self, path: &str, query: &HashMap<String, String>) -> Option<HashMap<String, String>> {
        match_path(&self.regex, &self.segments, path, query)
    }
}

/// Compile `route` into its anchored pattern
pub fn compile(route: &Route, query: &HashMap<String, String>) -> Result<CompiledRoute, RouteError> {
    let template = TemplateParser::parse(route.template.trim_matches('/')).map_err(|e| {
        RouteError::InvalidTemplate {
            template: route.template.clone(),
            reason: e.to_string(),
        }
    })?;

    let BuiltSegments {
        mut segments,
        defaults,
    } = build_segments(route, &escape_parts(&template), query)?;
    resolve_borders(&mut segments);

    let Assembled { pattern, outline } = assemble(&segments, query);
    let regex = build_regex(&pattern).map_err(|e| RouteError::InvalidTemplate {
        template: route.template.clone(),
        reason: e.to_string(),
    })?;

    debug!(template = %route.template, %pattern, %outline, "compiled route");

    Ok(CompiledRoute {
        regex,
        segments,
        defaults,
        outline,
    })
}
