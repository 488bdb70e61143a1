//! SQLite backend over the original `hawaii.sqlite` dataset
//!
//! Column names are mapped to the record types in the queries themselves
//! (`station` -> `station_id`, `prcp` -> `precipitation`, `tobs` ->
//! `temperature`); the schema is fixed, so nothing is reflected at
//! runtime. The pool is opened read-only and each request checks out a
//! connection for exactly one query.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::date::DateRange;
use crate::datastore::ClimateStore;
use crate::error::ClimateResult;
use crate::record::{Observation, Station};

const OBSERVATION_COLUMNS: &str =
    "station AS station_id, date, prcp AS precipitation, tobs AS temperature";

/// Read-only store over the measurement and station tables.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open a read-only connection pool against `database_url`
    /// (e.g. `sqlite://hawaii.sqlite`).
    pub async fn connect(database_url: &str) -> ClimateResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Connected to climate database at {}", database_url);
        Ok(Self { pool })
    }
}

#[async_trait]
impl ClimateStore for SqliteStore {
    async fn scan_observations(&self) -> ClimateResult<Vec<Observation>> {
        let rows = sqlx::query_as::<_, Observation>(&format!(
            "SELECT {OBSERVATION_COLUMNS} FROM measurement"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn scan_stations(&self) -> ClimateResult<Vec<Station>> {
        let rows = sqlx::query_as::<_, Station>(
            "SELECT station AS station_id, name, latitude, longitude, elevation FROM station",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn observations_for_station(
        &self,
        station_id: &str,
        since: NaiveDate,
    ) -> ClimateResult<Vec<Observation>> {
        let rows = sqlx::query_as::<_, Observation>(&format!(
            "SELECT {OBSERVATION_COLUMNS} FROM measurement WHERE station = ? AND date >= ?"
        ))
        .bind(station_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn observations_in_range(&self, range: &DateRange) -> ClimateResult<Vec<Observation>> {
        let rows = match range.end {
            Some(end) => {
                sqlx::query_as::<_, Observation>(&format!(
                    "SELECT {OBSERVATION_COLUMNS} FROM measurement WHERE date >= ? AND date <= ?"
                ))
                .bind(range.start)
                .bind(end)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Observation>(&format!(
                    "SELECT {OBSERVATION_COLUMNS} FROM measurement WHERE date >= ?"
                ))
                .bind(range.start)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }
}
