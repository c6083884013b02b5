//! Edge Functions runtime - Main entry point
//!
//! Accepts HTTP connections and hands each request to an edge function:
//! - `/functions/v1/<name>` runs the named function
//! - everything else runs the `main` function

mod config;
mod registry;
mod router;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::registry::FunctionRegistry;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub functions: FunctionRegistry,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,edge_runtime=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Edge Functions runtime");

    let config = AppConfig::from_env();
    tracing::info!("Configuration loaded: {:?}", config);

    let mut functions = FunctionRegistry::new(handler_main::FUNCTION);
    functions.register(handler_hello_world::FUNCTION);
    tracing::info!(functions = ?functions.names(), "Functions deployed");

    let addr = config.listen_addr();
    let state = Arc::new(AppState { config, functions });

    let app = router::create_runtime_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Runtime listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Runtime stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
