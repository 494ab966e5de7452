use anyhow::{Context, Result};

use crate::{
    config::yml_settings::RouteEntry,
    domain::{Route, RouteTable},
};

pub const DEFAULT_ROUTES_FILE: &str = "routes.yml";

/// Parse a routes file and register every entry, in file order
pub fn parse_route_table(yml: &str) -> Result<RouteTable> {
    let entries: Vec<serde_yaml::Value> =
        serde_yaml::from_str(yml).context("Routes file must be a YAML sequence")?;

    let mut table = RouteTable::new();
    for (index, value) in entries.into_iter().enumerate() {
        let entry = RouteEntry::try_from(value)
            .with_context(|| format!("Invalid route entry #{}", index + 1))?;
        let route: Route = entry.into();
        let template = route.template.clone();
        table
            .add(route)
            .with_context(|| format!("Could not register route #{} ({})", index + 1, template))?;
    }

    Ok(table)
}

/// Load the route table from `maybe_yml`, or from `routes.yml`
pub fn load_route_table(maybe_yml: Option<&str>) -> Result<RouteTable> {
    let path = maybe_yml.unwrap_or(DEFAULT_ROUTES_FILE);
    let yml = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read routes file {}", path))?;
    parse_route_table(&yml)
}
