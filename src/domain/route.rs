// Route definitions and match results

use serde::Serialize;
use std::collections::HashMap;

/// Default declared for a route parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParameterDefault {
    /// Literal value used when the parameter is absent from the path
    Value(String),
    /// The parameter may be absent and has no literal default
    Optional,
}

impl ParameterDefault {
    pub fn value(&self) -> Option<&str> {
        match self {
            ParameterDefault::Value(value) => Some(value.as_str()),
            ParameterDefault::Optional => None,
        }
    }
}

/// A registered URL route
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Route {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub template: String,
    pub defaults: HashMap<String, ParameterDefault>,
    pub constraints: HashMap<String, String>,
}

impl Route {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_default(mut self, parameter: impl Into<String>, default: ParameterDefault) -> Self {
        self.defaults.insert(parameter.into(), default);
        self
    }

    pub fn with_constraint(mut self, parameter: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.constraints.insert(parameter.into(), pattern.into());
        self
    }
}

impl From<&str> for Route {
    fn from(template: &str) -> Self {
        Route::new(template)
    }
}

impl From<String> for Route {
    fn from(template: String) -> Self {
        Route::new(template)
    }
}

/// Result of a successful match, one per resolve call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMatch {
    /// The matched route, with inline defaults merged into `defaults`
    pub route: Route,
    /// Values captured from the path, or taken from the query string
    pub values: HashMap<String, String>,
}

impl RouteMatch {
    /// Effective value of a parameter: the matched value, else its literal default
    pub fn value(&self, parameter: &str) -> Option<&str> {
        self.values
            .get(parameter)
            .map(String::as_str)
            .or_else(|| self.route.defaults.get(parameter).and_then(ParameterDefault::value))
    }

    pub fn name(&self) -> Option<&str> {
        self.route.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_builder() {
        let route = Route::new("user/{id}")
            .with_name("user")
            .with_default("tab", ParameterDefault::Value("profile".to_string()))
            .with_constraint("id", r"\d+");

        assert_eq!(route.name.as_deref(), Some("user"));
        assert_eq!(route.constraints.get("id").map(String::as_str), Some(r"\d+"));
        assert_eq!(
            route.defaults.get("tab"),
            Some(&ParameterDefault::Value("profile".to_string()))
        );
    }

    #[test]
    fn test_value_prefers_matched_then_default() {
        let route = Route::new("item/{id}")
            .with_default("id", ParameterDefault::Value("42".to_string()))
            .with_default("slug", ParameterDefault::Optional);
        let mut matched = RouteMatch {
            route,
            values: HashMap::new(),
        };

        assert_eq!(matched.value("id"), Some("42"));
        assert_eq!(matched.value("slug"), None);
        assert_eq!(matched.value("missing"), None);

        matched.values.insert("id".to_string(), "7".to_string());
        assert_eq!(matched.value("id"), Some("7"));
    }

    #[test]
    fn test_optional_default_serializes_as_null() {
        let json = serde_json::to_value(ParameterDefault::Optional).unwrap();
        assert!(json.is_null());
        let json = serde_json::to_value(ParameterDefault::Value("x".to_string())).unwrap();
        assert_eq!(json, serde_json::json!("x"));
    }
}
