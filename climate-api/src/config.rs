use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;

use climate_core::parse_date;

/// Configuration for the climate API service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind the HTTP server to
    pub bind_address: String,

    /// SQLite database URL, e.g. `sqlite://hawaii.sqlite`
    pub database_url: String,

    /// Station and date constants for the recent-observations route
    pub station: StationConfig,
}

/// Startup constants for the recent-observations (tobs) route.
///
/// The most active station and the latest date in the dataset were
/// determined by a one-off analysis of the source data; they are
/// configuration, not recomputed per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    /// Station whose observations the tobs route serves
    pub most_active: String,

    /// Last date with data in the dataset
    pub latest_date: NaiveDate,

    /// How far back from `latest_date` the tobs route reaches
    pub lookback_days: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            database_url: "sqlite://hawaii.sqlite".to_string(),
            station: StationConfig::default(),
        }
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            most_active: "USC00519281".to_string(),
            latest_date: NaiveDate::from_ymd_opt(2017, 8, 23).expect("valid date"),
            lookback_days: 365,
        }
    }
}

impl StationConfig {
    /// Lower bound for the tobs route: `latest_date - lookback_days`
    pub fn year_ago(&self) -> NaiveDate {
        self.latest_date - chrono::Duration::days(self.lookback_days)
    }
}

impl ApiConfig {
    /// Load configuration from environment variables and defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(bind_addr) = env::var("CLIMATE_BIND_ADDRESS") {
            config.bind_address = bind_addr;
        }

        if let Ok(database_url) = env::var("CLIMATE_DATABASE_URL") {
            config.database_url = database_url;
        }

        if let Ok(station) = env::var("CLIMATE_MOST_ACTIVE_STATION") {
            config.station.most_active = station;
        }

        if let Ok(latest) = env::var("CLIMATE_LATEST_DATE") {
            config.station.latest_date = parse_date(&latest)?;
        }

        if let Ok(lookback) = env::var("CLIMATE_LOOKBACK_DAYS") {
            config.station.lookback_days = lookback.parse()?;
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.bind_address.is_empty() {
            return Err(anyhow::anyhow!("Bind address cannot be empty"));
        }

        if self.database_url.is_empty() {
            return Err(anyhow::anyhow!("Database URL cannot be empty"));
        }

        if self.station.most_active.is_empty() {
            return Err(anyhow::anyhow!("Most active station cannot be empty"));
        }

        if self.station.lookback_days <= 0 {
            return Err(anyhow::anyhow!("Lookback days must be positive"));
        }

        Ok(())
    }
}
