// Ordered route table: first registered match wins

use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::compiler::compile;
use super::route::{ParameterDefault, Route, RouteMatch};
use crate::error::RouteError;

/// Stores the URL routes of an application in registration order.
///
/// The table does no locking of its own. A host that registers routes while
/// serving requests wraps it in a lock (see `AppState`).
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template string or a prebuilt route.
    ///
    /// The route is compiled once so that configuration errors such as a
    /// default conflict abort registration.
    pub fn add(&mut self, route: impl Into<Route>) -> Result<(), RouteError> {
        let route = route.into();

        if let Some(name) = route.name.as_deref() {
            if self.find(name).is_some() {
                return Err(RouteError::DuplicateRouteName {
                    name: name.to_string(),
                });
            }
        }

        compile(&route, &HashMap::new())?;

        info!(name = ?route.name, template = %route.template, "registered route");
        self.routes.push(route);
        Ok(())
    }

    /// Register a route with optional name, defaults and constraints
    pub fn add_route(
        &mut self,
        name: Option<&str>,
        template: &str,
        defaults: Option<HashMap<String, ParameterDefault>>,
        constraints: Option<HashMap<String, String>>,
    ) -> Result<(), RouteError> {
        self.add(Route {
            name: name.map(str::to_string),
            template: template.to_string(),
            defaults: defaults.unwrap_or_default(),
            constraints: constraints.unwrap_or_default(),
        })
    }

    /// Return the first route matching `path`, with its values populated.
    ///
    /// `path` is the request path as it appears on the wire, still
    /// percent-encoded; captured values come back decoded. Anything after a
    /// literal `?` is ignored and query parameters are taken from `query`.
    /// `None` means no route matched.
    pub fn resolve(&self, path: &str, query: &HashMap<String, String>) -> Option<RouteMatch> {
        let path = normalize_path(path);

        for route in &self.routes {
            let compiled = match compile(route, query) {
                Ok(compiled) => compiled,
                Err(e) => {
                    warn!(template = %route.template, error = %e, "skipping route that failed to compile");
                    continue;
                }
            };

            if let Some(values) = compiled.match_path(path, query) {
                debug!(template = %route.template, path, outline = compiled.outline(), "route matched");
                let route = Route {
                    defaults: compiled.into_defaults(),
                    ..route.clone()
                };
                return Some(RouteMatch { route, values });
            }
        }

        debug!(path, "no route matched");
        None
    }

    pub fn find(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name.as_deref() == Some(name))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Strip the query string and surrounding separators from a request path
pub fn normalize_path(path: &str) -> &str {
    let path = path.split_once('?').map_or(path, |(path, _)| path);
    path.trim_matches('/')
}
