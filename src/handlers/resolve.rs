// Fallback handler: resolves any request path against the route table

use axum::{extract::State, http::Uri, response::Json};
use serde::Serialize;
use std::{collections::HashMap, sync::Arc};

use crate::{domain::ParameterDefault, error::AppError, AppState};

/// JSON shape of a successful match
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    pub template: String,
    pub values: HashMap<String, String>,
    pub defaults: HashMap<String, ParameterDefault>,
}

/// Parse a raw query string into name/value pairs; later keys win
pub fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    query
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

pub async fn resolve_request(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Json<MatchResponse>, AppError> {
    // Matching runs on the encoded path; captured values are decoded afterwards
    let path = uri.path();
    let query = parse_query(uri.query());

    let table = state.route_table.read().await;
    let matched = table
        .resolve(path, &query)
        .ok_or_else(|| AppError::NotFound(format!("no route matches {}", path)))?;

    Ok(Json(MatchResponse {
        route: matched.route.name,
        template: matched.route.template,
        values: matched.values,
        defaults: matched.route.defaults,
    }))
}
