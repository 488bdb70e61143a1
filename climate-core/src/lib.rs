//! # Climate Core Library
//!
//! Shared library for the climate query service: record types for the
//! observation and station tables, calendar-date handling, the error
//! taxonomy, and the read-only data store abstraction with its SQLite
//! and in-memory backends.
//!
//! The dataset is fixed and read-only; nothing here writes, and the
//! schema is declared statically rather than reflected from the
//! database at runtime.

pub mod datastore;
pub mod date;
pub mod error;
pub mod query;
pub mod record;

// Re-export commonly used types
pub use datastore::{sqlite::SqliteStore, ClimateStore, MemoryStore};
pub use date::{parse_date, DateRange};
pub use error::{ClimateError, ClimateResult};
pub use query::{PrecipReading, TempSummary, TobsReading};
pub use record::{Observation, Station};

/// Version information for the climate service
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
