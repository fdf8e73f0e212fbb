//! # wellstat-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the well statistics API.
//! Binds to configurable port (default 8080).

use wellstat_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration failed: {e}");
        e
    })?;
    let port = config.port;
    tracing::info!(
        nnd_threshold = config.engine.nnd.high_input_threshold,
        nnd_reduced_cap = config.engine.nnd.reduced_cap,
        nnd_default_cap = config.engine.nnd.default_cap,
        top_companies = config.engine.top_companies_limit,
        "engine configured"
    );

    let app = wellstat_api::app(AppState::with_config(config));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Wellstat API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
