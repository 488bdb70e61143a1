//! Data store abstraction for the climate dataset
//!
//! The service only ever reads: backends expose full scans over the two
//! tables plus the range scans the query engine filters with. Row order
//! is whatever the backing storage yields; callers must not assume the
//! results are sorted.

pub mod sqlite;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::date::DateRange;
use crate::error::ClimateResult;
use crate::record::{Observation, Station};

/// Read-only access to the observation and station tables.
///
/// Implementations are responsible for connection-level isolation;
/// the query layer holds no state of its own and performs exactly one
/// store call per request.
#[async_trait]
pub trait ClimateStore: Send + Sync {
    /// Full scan of the observation table, storage order.
    async fn scan_observations(&self) -> ClimateResult<Vec<Observation>>;

    /// Full scan of the station table, storage order.
    async fn scan_stations(&self) -> ClimateResult<Vec<Station>>;

    /// Observations for one station with `date >= since`.
    async fn observations_for_station(
        &self,
        station_id: &str,
        since: NaiveDate,
    ) -> ClimateResult<Vec<Observation>>;

    /// Observations with `date >= range.start` and, when the range is
    /// closed, `date <= range.end`. An inverted range yields no rows.
    async fn observations_in_range(&self, range: &DateRange) -> ClimateResult<Vec<Observation>>;
}

/// In-memory store backed by plain vectors.
///
/// Used by unit and integration tests; scans return rows in insertion
/// order, which doubles as the "storage order" the API contract leaves
/// unspecified.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    observations: Vec<Observation>,
    stations: Vec<Station>,
}

impl MemoryStore {
    pub fn new(observations: Vec<Observation>, stations: Vec<Station>) -> Self {
        Self {
            observations,
            stations,
        }
    }
}

#[async_trait]
impl ClimateStore for MemoryStore {
    async fn scan_observations(&self) -> ClimateResult<Vec<Observation>> {
        Ok(self.observations.clone())
    }

    async fn scan_stations(&self) -> ClimateResult<Vec<Station>> {
        Ok(self.stations.clone())
    }

    async fn observations_for_station(
        &self,
        station_id: &str,
        since: NaiveDate,
    ) -> ClimateResult<Vec<Observation>> {
        Ok(self
            .observations
            .iter()
            .filter(|obs| obs.station_id == station_id && obs.date >= since)
            .cloned()
            .collect())
    }

    async fn observations_in_range(&self, range: &DateRange) -> ClimateResult<Vec<Observation>> {
        Ok(self
            .observations
            .iter()
            .filter(|obs| range.contains(obs.date))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::new(
            vec![
                Observation::new("USC00519281", d("2017-08-20"), Some(0.5), Some(78.0)),
                Observation::new("USC00519281", d("2017-08-20"), Some(0.7), Some(79.0)),
                Observation::new("USC00516128", d("2017-08-21"), None, Some(76.0)),
            ],
            vec![
                Station::new("USC00519281", "WAIHEE 837.5, HI US"),
                Station::new("USC00516128", "MANOA LYON ARBO 785.2, HI US"),
            ],
        )
    }

    #[tokio::test]
    async fn test_scan_keeps_duplicate_rows() {
        let store = sample_store();
        let rows = store.scan_observations().await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, rows[1].date);
    }

    #[tokio::test]
    async fn test_station_filter_applies_both_predicates() {
        let store = sample_store();
        let rows = store
            .observations_for_station("USC00519281", d("2017-08-20"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|obs| obs.station_id == "USC00519281"));

        let none = store
            .observations_for_station("USC00519281", d("2017-08-21"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_range_scan_honors_inverted_range() {
        let store = sample_store();
        let range = DateRange::between(d("2017-08-23"), d("2017-08-22"));
        let rows = store.observations_in_range(&range).await.unwrap();
        assert!(rows.is_empty());
    }
}
