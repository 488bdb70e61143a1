//! # Climate API Service Library
//!
//! Core components for the climate query service: configuration, the
//! query engine, response shaping, and the HTTP handlers.

use std::sync::Arc;

// Core modules
pub mod config;
pub mod handlers;
pub mod query_engine;
pub mod response;

// Re-export commonly used types
pub use config::ApiConfig;
pub use query_engine::QueryEngine;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub query_engine: Arc<QueryEngine>,
    pub config: Arc<ApiConfig>,
}

/// Build the service router with all routes and middleware.
///
/// Shared between `main` and the integration tests so both exercise the
/// same routing table.
pub fn router(state: AppState) -> axum::Router {
    use axum::routing::get;
    use handlers::{
        health_handler, index_handler, metrics_handler, precipitation_handler, stations_handler,
        temps_range_handler, temps_start_handler, tobs_handler,
    };
    use tower::ServiceBuilder;
    use tower_http::{cors::CorsLayer, trace::TraceLayer};

    axum::Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/temps/{start}", get(temps_start_handler))
        .route("/api/v1.0/temps/{start}/{end}", get(temps_range_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
