use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Json},
};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use climate_core::{ClimateError, DateRange};

use crate::response;
use crate::AppState;

type ApiError = (StatusCode, Json<Value>);

/// Map an engine error to an HTTP response: client input faults get a
/// 400, everything else (data store unreachable, etc.) a 500. No error
/// here is fatal to the process.
fn error_response(err: ClimateError) -> ApiError {
    let status = if err.is_client_error() {
        warn!("Client error: {}", err);
        StatusCode::BAD_REQUEST
    } else {
        error!("Request failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(json!({
            "error": "Query failed",
            "message": err.to_string(),
            "category": err.category()
        })),
    )
}

/// Route index served at `/`
pub async fn index_handler() -> Html<&'static str> {
    Html(
        "<h1>Welcome to the Hawaii Climate API</h1>\
         <p>Available routes:</p>\
         <ul>\
         <li><code>/api/v1.0/precipitation</code> &mdash; all precipitation records</li>\
         <li><code>/api/v1.0/stations</code> &mdash; weather station information</li>\
         <li><code>/api/v1.0/tobs</code> &mdash; temperature observations for the \
         most active station over the last year of data</li>\
         <li><code>/api/v1.0/temps/&lt;start&gt;</code> &mdash; min, average and max \
         temperatures from a start date (yyyy-mm-dd)</li>\
         <li><code>/api/v1.0/temps/&lt;start&gt;/&lt;end&gt;</code> &mdash; min, average \
         and max temperatures between two dates (yyyy-mm-dd)</li>\
         </ul>",
    )
}

/// All precipitation records, one single-key object per observation row
pub async fn precipitation_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let readings = state
        .query_engine
        .list_precipitation()
        .await
        .map_err(error_response)?;

    info!("Returning {} precipitation entries", readings.len());
    Ok(Json(response::precipitation_body(&readings)))
}

/// All station records
pub async fn stations_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let stations = state
        .query_engine
        .list_stations()
        .await
        .map_err(error_response)?;

    info!("Returning {} stations", stations.len());
    Ok(Json(response::stations_body(&stations)))
}

/// Last year of temperature observations for the configured station
pub async fn tobs_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let readings = state
        .query_engine
        .recent_observations()
        .await
        .map_err(error_response)?;

    info!("Returning {} temperature observations", readings.len());
    Ok(Json(response::tobs_body(&readings)))
}

/// `[min, avg, max]` over `date >= start`
pub async fn temps_start_handler(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<Value>, ApiError> {
    debug!("Aggregate request from start {}", start);
    let range = DateRange::parse(&start, None).map_err(error_response)?;

    let summary = state
        .query_engine
        .aggregate_temperature(&range)
        .await
        .map_err(error_response)?;

    Ok(Json(response::temps_body(&summary)))
}

/// `[min, avg, max]` over `start <= date <= end`
pub async fn temps_range_handler(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    debug!("Aggregate request for range {}..{}", start, end);
    let range = DateRange::parse(&start, Some(&end)).map_err(error_response)?;

    let summary = state
        .query_engine
        .aggregate_temperature(&range)
        .await
        .map_err(error_response)?;

    Ok(Json(response::temps_body(&summary)))
}

/// Health check endpoint
pub async fn health_handler() -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "service": "climate-api",
        "version": climate_core::VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// Metrics endpoint (Prometheus format)
pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    let metrics = state.query_engine.get_metrics().await;

    Ok(format!(
        "# HELP climate_queries_total Total number of queries executed\n\
         # TYPE climate_queries_total counter\n\
         climate_queries_total {}\n\
         # HELP climate_query_errors_total Total number of query errors\n\
         # TYPE climate_query_errors_total counter\n\
         climate_query_errors_total {}\n\
         # HELP climate_rows_returned_total Total number of rows returned\n\
         # TYPE climate_rows_returned_total counter\n\
         climate_rows_returned_total {}\n\
         # HELP climate_avg_query_time_ms Average query execution time in milliseconds\n\
         # TYPE climate_avg_query_time_ms gauge\n\
         climate_avg_query_time_ms {}\n",
        metrics.queries_executed,
        metrics.query_errors,
        metrics.rows_returned,
        metrics.avg_query_time_ms
    ))
}
