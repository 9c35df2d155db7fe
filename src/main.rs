// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::compression::predicate::{DefaultPredicate, NotForContentType, Predicate};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::{load_app_config, load_layouts};
use crate::infrastructure::http_source::HttpMetricsSource;
use crate::infrastructure::ndjson_stream::NDJSON_CONTENT_TYPE;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, get_panel, health_check, render_payloads, stream_dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("role_dashboard=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let app_config = load_app_config()?;
    let layouts = load_layouts(Path::new(&app_config.layouts.dir))?;
    tracing::info!("Loaded {} dashboard layouts", layouts.len());

    // Create metrics source (infrastructure layer)
    let source = Arc::new(HttpMetricsSource::new(
        app_config.source.base_url,
        app_config.source.token,
        Duration::from_secs(app_config.source.timeout_secs),
    )?);

    // Create services (application layer)
    let dashboard_service = DashboardService::new(source, layouts);
    let state = Arc::new(AppState { dashboard_service });

    // Streams are flushed per message, so they stay uncompressed
    let compression = CompressionLayer::new()
        .compress_when(DefaultPredicate::new().and(NotForContentType::new(NDJSON_CONTENT_TYPE)));

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboards/:role", get(get_dashboard))
        .route("/dashboards/:role/render", post(render_payloads))
        .route("/dashboards/:role/stream", get(stream_dashboard))
        .route("/dashboards/:role/panels/:panel_id", get(get_panel))
        .with_state(state)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = app_config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", app_config.server.bind))?;
    tracing::info!("Starting role-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
