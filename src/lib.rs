pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
mod handlers;

use axum::{routing::get, Router};
use clap::{Arg, ArgMatches};
use domain::RouteTable;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

pub use handlers::resolve::{parse_query, MatchResponse};

const DEFAULT_BIND: &str = "127.0.0.1:3000";

// Application state
pub struct AppState {
    /// Matching takes the read lock, registration the write lock
    pub route_table: RwLock<RouteTable>,
}

/// Settings collected from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub routes_path: Option<String>,
    pub bind: String,
}

impl Settings {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let routes_path = matches.get_one::<String>("routes").cloned();
        let bind = matches
            .get_one::<String>("bind")
            .map(|b| b.as_str())
            .unwrap_or(DEFAULT_BIND)
            .to_string();

        Self { routes_path, bind }
    }
}

/// Command line interface of the routemap server
pub fn cli() -> clap::Command {
    clap::Command::new("routemap")
        .about("Resolves request paths against an ordered table of URL templates")
        .arg(
            Arg::new("routes")
                .short('r')
                .long("routes")
                .value_name("ROUTES")
                .help("Path to a YAML file containing route definitions"),
        )
        .arg(
            Arg::new("bind")
                .short('b')
                .long("bind")
                .value_name("ADDRESS")
                .help("Address to listen on")
                .default_value(DEFAULT_BIND),
        )
}

// Public function to create the router
pub fn create_router(route_table: RouteTable) -> Router {
    let state = Arc::new(AppState {
        route_table: RwLock::new(route_table),
    });

    Router::new()
        .route(
            "/_routes",
            get(handlers::routes::list_routes).post(handlers::routes::register_route),
        )
        .fallback(handlers::resolve::resolve_request)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
