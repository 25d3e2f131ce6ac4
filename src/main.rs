use anyhow::{Context, Result};
use std::net::SocketAddr;
use sustain_site::config::Config;
use sustain_site::server::{build_router, AppState};
use sustain_site::signup::SignupService;
use sustain_site::store::SignupStore;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sustain_site=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    let store = SignupStore::open(&config.data_dir)
        .await
        .with_context(|| format!("Failed to prepare data directory {}", config.data_dir.display()))?;
    info!("✓ Signups stored in {}", store.path().display());

    if !config.public_dir.join("index.html").exists() {
        warn!(
            "No index.html in {}, unmatched routes will return an empty 404",
            config.public_dir.display()
        );
    }

    let app = build_router(AppState::new(SignupService::new(store)), &config.public_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on http://localhost:{}", config.port);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
