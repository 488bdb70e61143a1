use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use climate_api::{router, ApiConfig, AppState, QueryEngine};
use climate_core::{ClimateStore, SqliteStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Arc::new(ApiConfig::load()?);
    config.validate()?;
    info!("Loaded configuration: {:?}", config);

    // Connect to the climate dataset
    let store: Arc<dyn ClimateStore> = Arc::new(SqliteStore::connect(&config.database_url).await?);
    info!("Connected to data store");

    // Initialize query engine
    let query_engine = Arc::new(QueryEngine::new(store, config.clone()));

    // Create shared state and router
    let state = AppState {
        query_engine,
        config: config.clone(),
    };
    let app = router(state);

    // Start server
    let listener = TcpListener::bind(&config.bind_address).await?;
    let addr = listener.local_addr()?;
    info!("Climate API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
