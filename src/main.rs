//! Festival Countdown - live countdowns for storefront festival banners
//! 
//! This is the main entry point for the festival-countdown service.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use festival_countdown::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::section_refresh_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("festival_countdown={},tower_http=info", config.log_level()))
        .init();

    let source = config.section_source();

    info!("Starting festival-countdown server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, sections={}, refresh={}s",
          config.host, config.port, source.describe(), config.refresh_secs);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.refresh_secs));

    // Start the section refresh background task
    let refresh_state = Arc::clone(&state);
    let refresh = tokio::spawn(async move {
        section_refresh_task(refresh_state, source).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    
    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /sections          - Render every festival banner");
    info!("  GET  /sections/:id      - Render one festival banner");
    info!("  GET  /countdown?target= - Compute the time left until an instant");
    info!("  POST /offers            - Render festival offer cards");
    info!("  POST /offers/banner     - Render an offer banner");
    info!("  POST /hero              - Render a festival hero");
    info!("  GET  /status            - Check refresh and countdown status");
    info!("  GET  /health            - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);
    
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    refresh.abort();
    if let Err(e) = state.unmount_all() {
        tracing::warn!("Failed to unmount banners: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
