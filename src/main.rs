//! Atelier - Art-portfolio site service.
//!
//! Serves the JSON API behind the portfolio pages: translations and
//! locale selection, the gallery, and the contact form relay.

use tracing::info;
use tracing_subscriber::EnvFilter;

use atelier::config::Config;
use atelier::server;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("atelier=info,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Atelier...");

    let config = Config::from_env();
    info!("Configuration loaded successfully");
    info!("Site origin: {}", config.site_origin);

    server::serve(&config).await?;

    Ok(())
}
