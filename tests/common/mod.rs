// Common test utilities shared across test files

use axum::{body::Body, http::Response};
use http_body_util::BodyExt;
use routemap::domain::RouteTable;
use std::collections::HashMap;

/// Create a test Axum router backed by the bundled routes.yml
#[allow(dead_code)]
pub fn create_test_app() -> axum::Router {
    let table = routemap::config::routes::load_route_table(None)
        .expect("Failed to load bundled routes file");
    routemap::create_router(table)
}

/// Create a test Axum router with an empty route table
#[allow(dead_code)]
pub fn create_empty_app() -> axum::Router {
    routemap::create_router(RouteTable::new())
}

/// Collect a response body and parse it as JSON
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

/// Build a query map from pairs
#[allow(dead_code)]
pub fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
