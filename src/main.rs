use routemap::{config::routes::load_route_table, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let matches = routemap::cli().get_matches();
    let settings = Settings::from_matches(&matches);

    let route_table = load_route_table(settings.routes_path.as_deref())?;
    info!(routes = route_table.len(), "loaded route table");

    let app = routemap::create_router(route_table);

    let listener = tokio::net::TcpListener::bind(&settings.bind).await?;
    info!("routemap listening on {}", settings.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
