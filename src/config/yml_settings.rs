use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::{ParameterDefault, Route};
use crate::error::RouteError;

/// A route definition as written in the routes file.
///
/// A `~` default marks the parameter optional without a literal value.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RouteSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub template: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub defaults: HashMap<String, Option<String>>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub constraints: HashMap<String, String>,
}

impl From<RouteSettings> for Route {
    fn from(settings: RouteSettings) -> Self {
        let defaults = settings
            .defaults
            .into_iter()
            .map(|(parameter, value)| {
                let default = match value {
                    Some(value) => ParameterDefault::Value(value),
                    None => ParameterDefault::Optional,
                };
                (parameter, default)
            })
            .collect();

        Route {
            name: settings.name,
            template: settings.template,
            defaults,
            constraints: settings.constraints,
        }
    }
}

/// One entry of the routes file: a bare template or a full definition
#[derive(Debug, PartialEq)]
pub enum RouteEntry {
    Template(String),
    Definition(RouteSettings),
}

impl TryFrom<serde_yaml::Value> for RouteEntry {
    type Error = RouteError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        match value {
            serde_yaml::Value::String(template) => Ok(RouteEntry::Template(template)),
            value @ serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value)
                .map(RouteEntry::Definition)
                .map_err(|e| RouteError::InvalidRoute(e.to_string())),
            serde_yaml::Value::Null => Err(RouteError::InvalidRoute("empty entry".to_string())),
            serde_yaml::Value::Bool(_) | serde_yaml::Value::Number(_) => {
                Err(RouteError::InvalidRoute("scalar value".to_string()))
            }
            serde_yaml::Value::Sequence(_) => Err(RouteError::InvalidRoute("sequence".to_string())),
            serde_yaml::Value::Tagged(_) => Err(RouteError::InvalidRoute("tagged value".to_string())),
        }
    }
}

impl From<RouteEntry> for Route {
    fn from(entry: RouteEntry) -> Self {
        match entry {
            RouteEntry::Template(template) => Route::new(template),
            RouteEntry::Definition(settings) => settings.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde() {
        let mut defaults = HashMap::new();
        defaults.insert("slug".to_string(), None);
        defaults.insert("page".to_string(), Some("1".to_string()));
        let settings = RouteSettings {
            name: Some("blog".to_string()),
            template: "blog/{year}/{slug}".to_string(),
            defaults,
            constraints: HashMap::new(),
        };

        let yml = serde_yaml::to_string(&settings).unwrap();
        let deserde: RouteSettings = serde_yaml::from_str(&yml).unwrap();
        assert_eq!(settings, deserde);
    }

    #[test]
    fn test_skip_empty_fields_in_yaml() {
        let settings = RouteSettings {
            template: "about".to_string(),
            ..RouteSettings::default()
        };

        let yml = serde_yaml::to_string(&settings).unwrap();

        assert!(!yml.contains("name:"));
        assert!(!yml.contains("defaults:"));
        assert!(!yml.contains("constraints:"));
        assert!(yml.contains("template:"));
    }

    #[test]
    fn test_null_default_means_optional() {
        let settings: RouteSettings = serde_yaml::from_str(
            "template: user/{id}/{tab}\ndefaults:\n  tab: ~\n  id: \"1\"\n",
        )
        .unwrap();
        let route: Route = settings.into();

        assert_eq!(route.defaults.get("tab"), Some(&ParameterDefault::Optional));
        assert_eq!(
            route.defaults.get("id"),
            Some(&ParameterDefault::Value("1".to_string()))
        );
    }

    #[test]
    fn test_entry_from_string() {
        let entry = RouteEntry::try_from(serde_yaml::Value::String("about".to_string())).unwrap();
        assert_eq!(entry, RouteEntry::Template("about".to_string()));
    }

    #[test]
    fn test_entry_rejects_other_shapes() {
        let value: serde_yaml::Value = serde_yaml::from_str("42").unwrap();
        assert!(matches!(RouteEntry::try_from(value), Err(RouteError::InvalidRoute(_))));

        let value: serde_yaml::Value = serde_yaml::from_str("[a, b]").unwrap();
        assert!(matches!(RouteEntry::try_from(value), Err(RouteError::InvalidRoute(_))));

        let value: serde_yaml::Value = serde_yaml::from_str("name: home").unwrap();
        assert!(matches!(RouteEntry::try_from(value), Err(RouteError::InvalidRoute(_))));

        let value: serde_yaml::Value = serde_yaml::from_str("template: a\nmethod: GET").unwrap();
        assert!(matches!(RouteEntry::try_from(value), Err(RouteError::InvalidRoute(_))));
    }
}
