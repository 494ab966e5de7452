// Route table inspection and registration handlers

use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::info;

use crate::{config::yml_settings::RouteSettings, domain::Route, error::AppError, AppState};

// GET /_routes - List registered routes in match order
pub async fn list_routes(State(state): State<Arc<AppState>>) -> Json<Vec<Route>> {
    let table = state.route_table.read().await;
    Json(table.routes().to_vec())
}

// POST /_routes - Register a route at the end of the table
pub async fn register_route(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<RouteSettings>,
) -> Result<(StatusCode, Json<Route>), AppError> {
    let route: Route = settings.into();

    let mut table = state.route_table.write().await;
    table.add(route.clone())?;
    info!(template = %route.template, total = table.len(), "route registered over HTTP");

    Ok((StatusCode::CREATED, Json(route)))
}
