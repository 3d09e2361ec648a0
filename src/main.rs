// Main entry point - Dependency injection and server setup
use std::sync::Arc;

use anyhow::Context;
use dashboard_canvas::application::canvas_service::CanvasService;
use dashboard_canvas::application::filter_service::FilterService;
use dashboard_canvas::infrastructure::config::load_app_config;
use dashboard_canvas::infrastructure::memory_store::InMemoryDashboardStore;
use dashboard_canvas::presentation::app_state::AppState;
use dashboard_canvas::presentation::router::build_router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config().context("failed to load configuration")?;
    let grid = config.grid.to_grid_spec()?;

    // Create store (infrastructure layer)
    let store = Arc::new(InMemoryDashboardStore::new());

    // Create services (application layer)
    let canvas_service = CanvasService::new(store, grid);
    let filter_service = FilterService::new(config.aliases);

    let state = Arc::new(AppState {
        canvas_service,
        filter_service,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, columns = grid.columns, "starting dashboard-canvas service");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, router).await?;

    Ok(())
}
