use std::sync::Arc;
use std::time::{Duration, Instant};

use climate_core::{
    ClimateResult, ClimateStore, DateRange, PrecipReading, Station, TempSummary, TobsReading,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::ApiConfig;

/// Counters for monitoring query engine activity
#[derive(Debug, Default)]
pub struct QueryEngineMetrics {
    pub queries_executed: u64,
    pub query_errors: u64,
    pub rows_returned: u64,
    pub avg_query_time_ms: f64,
    pub total_query_time_ms: u64,
}

/// Executes the four query shapes against the data store.
///
/// Each operation performs exactly one store read and is pure given the
/// dataset snapshot; there is no caching, so every request re-scans.
pub struct QueryEngine {
    store: Arc<dyn ClimateStore>,
    config: Arc<ApiConfig>,
    metrics: Arc<RwLock<QueryEngineMetrics>>,
}

impl QueryEngine {
    pub fn new(store: Arc<dyn ClimateStore>, config: Arc<ApiConfig>) -> Self {
        Self {
            store,
            config,
            metrics: Arc::new(RwLock::new(QueryEngineMetrics::default())),
        }
    }

    /// All precipitation readings, one per observation row.
    ///
    /// Storage order, unsorted; repeated dates stay as separate entries.
    pub async fn list_precipitation(&self) -> ClimateResult<Vec<PrecipReading>> {
        let start = Instant::now();
        let result = self.store.scan_observations().await.map(|rows| {
            rows.into_iter()
                .map(|obs| PrecipReading {
                    date: obs.date,
                    precipitation: obs.precipitation,
                })
                .collect::<Vec<_>>()
        });
        self.finish("precipitation", start, &result).await;
        result
    }

    /// All stations, one entry per row, storage order.
    pub async fn list_stations(&self) -> ClimateResult<Vec<Station>> {
        let start = Instant::now();
        let result = self.store.scan_stations().await;
        self.finish("stations", start, &result).await;
        result
    }

    /// Temperature readings for the configured most-active station over
    /// the last year of data (`latest_date - lookback_days` onward).
    pub async fn recent_observations(&self) -> ClimateResult<Vec<TobsReading>> {
        let station = &self.config.station;
        debug!(
            "Querying tobs for station {} since {}",
            station.most_active,
            station.year_ago()
        );

        let start = Instant::now();
        let result = self
            .store
            .observations_for_station(&station.most_active, station.year_ago())
            .await
            .map(|rows| {
                rows.into_iter()
                    .map(|obs| TobsReading {
                        date: obs.date,
                        temperature: obs.temperature,
                    })
                    .collect::<Vec<_>>()
            });
        self.finish("tobs", start, &result).await;
        result
    }

    /// Min/avg/max of non-null temperatures within `range`.
    ///
    /// Zero matching rows is a valid result: all three fields come back
    /// `None`. An inverted range is treated the same way, not an error.
    pub async fn aggregate_temperature(&self, range: &DateRange) -> ClimateResult<TempSummary> {
        let start = Instant::now();
        let result = self
            .store
            .observations_in_range(range)
            .await
            .map(|rows| TempSummary::from_temperatures(rows.into_iter().map(|o| o.temperature)));

        match &result {
            Ok(summary) => {
                self.record_query(start.elapsed(), 1).await;
                info!("Aggregated temperature over {:?}: {:?}", range, summary);
            }
            Err(_) => self.record_error().await,
        }
        result
    }

    /// Get a snapshot of the current metrics
    pub async fn get_metrics(&self) -> QueryEngineMetrics {
        let metrics = self.metrics.read().await;
        QueryEngineMetrics {
            queries_executed: metrics.queries_executed,
            query_errors: metrics.query_errors,
            rows_returned: metrics.rows_returned,
            avg_query_time_ms: metrics.avg_query_time_ms,
            total_query_time_ms: metrics.total_query_time_ms,
        }
    }

    async fn finish<T>(&self, route: &str, start: Instant, result: &ClimateResult<Vec<T>>) {
        match result {
            Ok(rows) => {
                let elapsed = start.elapsed();
                self.record_query(elapsed, rows.len()).await;
                info!(
                    "{} query completed in {:?}, returned {} rows",
                    route,
                    elapsed,
                    rows.len()
                );
            }
            Err(_) => self.record_error().await,
        }
    }

    async fn record_query(&self, duration: Duration, rows: usize) {
        let mut metrics = self.metrics.write().await;
        metrics.queries_executed += 1;
        metrics.rows_returned += rows as u64;
        metrics.total_query_time_ms += duration.as_millis() as u64;
        metrics.avg_query_time_ms =
            metrics.total_query_time_ms as f64 / metrics.queries_executed as f64;
    }

    async fn record_error(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.query_errors += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use climate_core::{MemoryStore, Observation, Station};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn engine_with(observations: Vec<Observation>, stations: Vec<Station>) -> QueryEngine {
        let store = Arc::new(MemoryStore::new(observations, stations));
        QueryEngine::new(store, Arc::new(ApiConfig::default()))
    }

    #[tokio::test]
    async fn test_precipitation_keeps_duplicate_dates() {
        let engine = engine_with(
            vec![
                Observation::new("USC00519281", d("2017-08-20"), Some(0.5), None),
                Observation::new("USC00519281", d("2017-08-20"), Some(0.7), None),
            ],
            vec![],
        );

        let readings = engine.list_precipitation().await.unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].precipitation, Some(0.5));
        assert_eq!(readings[1].precipitation, Some(0.7));
    }

    #[tokio::test]
    async fn test_stations_one_entry_per_row() {
        let engine = engine_with(
            vec![],
            vec![
                Station::new("USC00519281", "WAIHEE 837.5, HI US"),
                Station::new("USC00516128", "MANOA LYON ARBO 785.2, HI US"),
            ],
        );

        let stations = engine.list_stations().await.unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].station_id, "USC00519281");
    }

    #[tokio::test]
    async fn test_recent_observations_filters_by_config() {
        // Default config: USC00519281, lookback from 2017-08-23
        let engine = engine_with(
            vec![
                Observation::new("USC00519281", d("2017-08-20"), None, Some(78.0)),
                Observation::new("USC00519281", d("2015-01-01"), None, Some(70.0)),
                Observation::new("USC00516128", d("2017-08-20"), None, Some(76.0)),
            ],
            vec![],
        );

        let readings = engine.recent_observations().await.unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].temperature, Some(78.0));
    }

    #[tokio::test]
    async fn test_aggregate_ignores_null_temperatures() {
        let engine = engine_with(
            vec![
                Observation::new("A", d("2017-01-02"), None, Some(58.0)),
                Observation::new("A", d("2017-01-03"), None, Some(60.0)),
                Observation::new("A", d("2017-01-04"), None, None),
                Observation::new("A", d("2017-01-05"), None, Some(62.0)),
            ],
            vec![],
        );

        let summary = engine
            .aggregate_temperature(&DateRange::from(d("2017-01-01")))
            .await
            .unwrap();
        assert_eq!(summary.min, Some(58.0));
        assert_eq!(summary.avg, Some(60.0));
        assert_eq!(summary.max, Some(62.0));
    }

    #[tokio::test]
    async fn test_aggregate_empty_range_is_all_none() {
        let engine = engine_with(
            vec![Observation::new("A", d("2017-01-02"), None, Some(58.0))],
            vec![],
        );

        let summary = engine
            .aggregate_temperature(&DateRange::between(d("2018-01-01"), d("2018-02-01")))
            .await
            .unwrap();
        assert!(summary.is_empty());
    }

    #[tokio::test]
    async fn test_metrics_count_queries() {
        let engine = engine_with(vec![], vec![]);
        engine.list_stations().await.unwrap();
        engine.list_precipitation().await.unwrap();

        let metrics = engine.get_metrics().await;
        assert_eq!(metrics.queries_executed, 2);
        assert_eq!(metrics.query_errors, 0);
    }
}
