use conduit_api::{
    app::{self, AppState},
    config::config,
    database::DatabaseManager,
    is_development,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, CONDUIT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config();
    tracing::info!("Starting Conduit API in {:?} mode", config.environment);
    if is_development!() {
        tracing::info!("Development mode: permissive CORS, IAST routes {}", config.iast.enabled);
    }

    let pool = DatabaseManager::setup(&config.database).await?;
    let app = app::router(AppState::new(pool, config.clone()));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Conduit API listening on http://{}", bind_addr);

    app::serve(listener, app).await?;
    Ok(())
}
