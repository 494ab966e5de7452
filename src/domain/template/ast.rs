// Token types for route templates

use std::fmt;

use crate::domain::route::ParameterDefault;

/// Represents a parsed route template as a list of parts
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub parts: Vec<TemplatePart>,
}

impl Template {
    pub fn new(parts: Vec<TemplatePart>) -> Self {
        Self { parts }
    }

    /// Get all placeholders in this template, left to right
    pub fn placeholders(&self) -> Vec<&Placeholder> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::Placeholder(p) => Some(p),
                _ => None,
            })
            .collect()
    }
}

/// A template consists of literal text and placeholders
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Literal(String),
    Placeholder(Placeholder),
}

/// A `{...}` token naming a capturable route parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub name: String,
    pub default: InlineDefault,
}

impl Placeholder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: InlineDefault::None,
        }
    }

    pub fn with_default(mut self, default: InlineDefault) -> Self {
        self.default = default;
        self
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            InlineDefault::None => write!(f, "{{{}}}", self.name),
            InlineDefault::Optional => write!(f, "{{{}?}}", self.name),
            InlineDefault::Value(value) => write!(f, "{{{}={}}}", self.name, value),
        }
    }
}

/// Default declared inside the placeholder itself
#[derive(Debug, Clone, PartialEq)]
pub enum InlineDefault {
    /// `{name}`
    None,
    /// `{name=value}`
    Value(String),
    /// `{name?}`
    Optional,
}

impl InlineDefault {
    pub fn to_parameter_default(&self) -> Option<ParameterDefault> {
        match self {
            InlineDefault::None => None,
            InlineDefault::Value(value) => Some(ParameterDefault::Value(value.clone())),
            InlineDefault::Optional => Some(ParameterDefault::Optional),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_display_round_trips_syntax() {
        assert_eq!(Placeholder::new("id").to_string(), "{id}");
        assert_eq!(
            Placeholder::new("slug").with_default(InlineDefault::Optional).to_string(),
            "{slug?}"
        );
        assert_eq!(
            Placeholder::new("page")
                .with_default(InlineDefault::Value("1".to_string()))
                .to_string(),
            "{page=1}"
        );
    }

    #[test]
    fn test_inline_default_conversion() {
        assert_eq!(InlineDefault::None.to_parameter_default(), None);
        assert_eq!(
            InlineDefault::Optional.to_parameter_default(),
            Some(ParameterDefault::Optional)
        );
        assert_eq!(
            InlineDefault::Value(String::new()).to_parameter_default(),
            Some(ParameterDefault::Value(String::new()))
        );
    }
}
