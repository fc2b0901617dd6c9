//! penguin-projects - project folder tracker service
//!
//! Serves the reconciled project list of a projects root over HTTP and
//! maintains the `.inside.yaml` side-car store next to the project folders.

use anyhow::Result;
use clap::Parser;
use penguin_projects::config::{Args, ServiceConfig};
use penguin_projects::services::store_path_for;
use penguin_projects::{build_router, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServiceConfig::resolve(&args)?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting Penguin project tracker (penguin-projects) v{}",
        env!("CARGO_PKG_VERSION")
    );
    if let Some(path) = &config.config_path {
        info!("Config file: {}", path.display());
    }

    info!("Projects root: {}", config.projects_root.display());
    if !config.projects_root.is_dir() {
        warn!(
            "Projects root {} does not exist yet; listing will fail until it is created",
            config.projects_root.display()
        );
    }
    info!("Side-car store: {}", store_path_for(&config.projects_root).display());

    let state = AppState::new(config.projects_root.clone());
    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("penguin-projects listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
