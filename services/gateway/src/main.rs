mod config;
mod error;
mod handlers;
mod models;
mod router;
mod state;

use config::GatewayConfig;
use portal_core::catalog::CourseCatalog;
use router::create_router;
use state::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Optional .env next to the binary
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting portal gateway");

    let config = GatewayConfig::from_env()?;

    let catalog = match &config.catalog_path {
        Some(path) => CourseCatalog::from_path(path)?,
        None => CourseCatalog::builtin()?,
    };
    tracing::info!(courses = catalog.len(), "Course catalog ready");

    let app = create_router(AppState::new(catalog));

    let listener = TcpListener::bind(config.bind_addr).await?;

    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
