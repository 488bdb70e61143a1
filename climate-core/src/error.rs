//! Error types for climate query operations

use thiserror::Error;

/// Result type for climate query operations
pub type ClimateResult<T> = Result<T, ClimateError>;

/// Error taxonomy for the climate service.
///
/// Two things can go wrong serving a request: the client sent a date
/// that does not parse, or the data store cannot be reached. Empty
/// results are success, not errors.
#[derive(Error, Debug)]
pub enum ClimateError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Data store error: {0}")]
    DataStore(String),
}

impl From<sqlx::Error> for ClimateError {
    fn from(err: sqlx::Error) -> Self {
        Self::DataStore(err.to_string())
    }
}

impl ClimateError {
    /// Create a new invalid-date error
    pub fn invalid_date<S: Into<String>>(message: S) -> Self {
        Self::InvalidDate(message.into())
    }

    /// Create a new data store error
    pub fn datastore<S: Into<String>>(message: S) -> Self {
        Self::DataStore(message.into())
    }

    /// True when the fault lies with the client's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClimateError::InvalidDate(_))
    }

    /// Get the error category for status mapping and metrics
    pub fn category(&self) -> &'static str {
        match self {
            ClimateError::InvalidDate(_) => "invalid_date",
            ClimateError::DataStore(_) => "datastore",
        }
    }
}
