//! Response shaping: typed engine results to the documented wire shapes
//!
//! The shapes here are the API contract and mirror the original service
//! byte-for-byte in structure (field names, the single-key precipitation
//! objects, the flattened `[min, avg, max]` array), so nothing in this
//! module resorts or deduplicates.

use serde_json::{json, Map, Value};

use climate_core::{PrecipReading, Station, TempSummary, TobsReading};

/// Sentinel first element of the tobs response, carried over from the
/// original service's wire format. See DESIGN.md for the decision to
/// keep it.
pub const TOBS_SENTINEL: i64 = 0;

/// `[{<date>: <precip|null>}, ...]` — one single-key object per reading.
///
/// Repeated dates each produce their own object; merging them into one
/// map would silently drop duplicate observations.
pub fn precipitation_body(readings: &[PrecipReading]) -> Value {
    let entries: Vec<Value> = readings
        .iter()
        .map(|reading| {
            let mut entry = Map::new();
            entry.insert(reading.date.to_string(), json!(reading.precipitation));
            Value::Object(entry)
        })
        .collect();
    Value::Array(entries)
}

/// `[{"station": id, "name": name}, ...]` in scan order.
pub fn stations_body(stations: &[Station]) -> Value {
    let entries: Vec<Value> = stations
        .iter()
        .map(|station| {
            json!({
                "station": station.station_id,
                "name": station.name,
            })
        })
        .collect();
    Value::Array(entries)
}

/// Sentinel `0` followed by `{"date", "temperature observed"}` objects.
pub fn tobs_body(readings: &[TobsReading]) -> Value {
    let mut entries: Vec<Value> = Vec::with_capacity(readings.len() + 1);
    entries.push(json!(TOBS_SENTINEL));
    for reading in readings {
        entries.push(json!({
            "date": reading.date.to_string(),
            "temperature observed": reading.temperature,
        }));
    }
    Value::Array(entries)
}

/// Flat `[min, avg, max]`, `null` for fields with no matching data.
pub fn temps_body(summary: &TempSummary) -> Value {
    json!([summary.min, summary.avg, summary.max])
}
