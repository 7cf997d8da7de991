// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{sync::Arc, time::Duration};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::plot_service::PlotService;
use crate::application::storm_service::StormService;
use crate::application::track_plotter::TrackPlotter;
use crate::infrastructure::cached_repository::CachedStormRepository;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::ibtracs_repository::IbtracsRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, list_basins, list_storms, storm_scene};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer), cached per (basin, year[, storm])
    let ibtracs = Arc::new(IbtracsRepository::new(
        config.ibtracs.base_url.clone(),
        Duration::from_secs(config.ibtracs.timeout_secs),
        Duration::from_secs(config.cache.season_ttl_secs),
    )?);
    let repository = Arc::new(CachedStormRepository::new(
        ibtracs,
        Duration::from_secs(config.cache.storm_list_ttl_secs),
        Duration::from_secs(config.cache.track_ttl_secs),
    ));

    // Create services (application layer)
    let plotter = TrackPlotter::new(config.sanitizer.clone(), config.layout.clone());
    let storm_service = StormService::new(repository.clone());
    let plot_service = PlotService::new(repository.clone(), plotter);

    // Create application state
    let state = Arc::new(AppState {
        storm_service,
        plot_service,
    });

    // Build router (presentation layer)
    // Compression is negotiated per response in http_response, not by a layer
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/basins", get(list_basins))
        .route("/basins/:basin/years/:year/storms", get(list_storms))
        .route("/basins/:basin/years/:year/storms/:storm/scene", get(storm_scene))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.server.addr.as_str()).await?;
    tracing::info!("Starting stormtrack service on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
