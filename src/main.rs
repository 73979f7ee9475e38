// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use anyhow::Context;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::Dashboard;
use crate::application::durable_storage::DurableStorage;
use crate::application::refresh_controller::RefreshController;
use crate::domain::registry::WidgetRegistry;
use crate::infrastructure::config::load_config;
use crate::infrastructure::file_storage::FileStorage;
use crate::infrastructure::memory_storage::MemoryStorage;
use crate::infrastructure::notifier::BroadcastNotifier;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_widget, drag_end, drag_start, get_dashboard, health_check, list_registry, refresh,
    remove_widget, set_viewport, stream_dashboard_events, toggle_expansion,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_config()?;
    let registry = Arc::new(WidgetRegistry::with_sizes(&config.size_overrides()?));

    // Create storage (infrastructure layer)
    let storage: Arc<dyn DurableStorage> = if config.storage.in_memory {
        tracing::info!("using in-memory layout storage");
        Arc::new(MemoryStorage::default())
    } else {
        tracing::info!(path = %config.storage.path.display(), "using file layout storage");
        Arc::new(FileStorage::new(config.storage.path.clone()))
    };
    let notifier = BroadcastNotifier::default();

    // Create dashboard and controllers (application layer)
    let dashboard = Dashboard::initialize(
        storage,
        Arc::new(notifier.clone()),
        registry,
        &config.layout,
    )
    .await;
    let refresh_controller = RefreshController::new(
        Arc::new(notifier.clone()),
        Duration::from_millis(config.refresh.delay_ms),
    );

    // Create application state
    let state = Arc::new(AppState {
        dashboard: Mutex::new(dashboard),
        refresh: refresh_controller,
        notifier,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/registry", get(list_registry))
        .route("/dashboard", get(get_dashboard))
        .route("/viewport", post(set_viewport))
        .route("/widgets", post(add_widget))
        .route("/widgets/:position", delete(remove_widget))
        .route("/expansion/:id", post(toggle_expansion))
        .route("/drag/start", post(drag_start))
        .route("/drag/end", post(drag_end))
        .route("/refresh", post(refresh))
        .route("/events", get(stream_dashboard_events))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid server.bind address '{}'", config.server.bind))?;
    tracing::info!(%addr, "starting crypto-dashboard service");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
