//! Record types for the climate dataset
//!
//! The schema is declared statically: one daily observation row per
//! station per date (duplicates tolerated, never deduplicated here),
//! and one row per physical station. Both are read-only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One station/date row with precipitation and/or temperature.
///
/// Either measurement may be missing; a missing value is carried as
/// `None`, never as zero.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Observation {
    /// Station code, e.g. `USC00519281`
    pub station_id: String,
    /// Observation date
    pub date: NaiveDate,
    /// Precipitation in inches, if recorded
    pub precipitation: Option<f64>,
    /// Observed temperature in degrees Fahrenheit, if recorded
    pub temperature: Option<f64>,
}

/// A physical sensor site.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Station {
    /// Station code
    pub station_id: String,
    /// Human-readable site name
    pub name: String,
    /// Descriptive fields, passed through unused
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

impl Observation {
    pub fn new(
        station_id: impl Into<String>,
        date: NaiveDate,
        precipitation: Option<f64>,
        temperature: Option<f64>,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            date,
            precipitation,
            temperature,
        }
    }
}

impl Station {
    pub fn new(station_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            name: name.into(),
            latitude: None,
            longitude: None,
            elevation: None,
        }
    }
}
