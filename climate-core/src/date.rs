//! Calendar-date handling for query bounds

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ClimateError, ClimateResult};

/// Parse an ISO `yyyy-mm-dd` date string from request input.
pub fn parse_date(s: &str) -> ClimateResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| ClimateError::invalid_date(format!("'{s}' is not a yyyy-mm-dd date: {e}")))
}

/// Inclusive date range for aggregation queries.
///
/// The upper bound is optional; an absent `end` means "everything from
/// `start` onward". `end >= start` is deliberately not enforced: an
/// inverted range matches zero rows, which is a valid (empty) result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Start date (inclusive)
    pub start: NaiveDate,
    /// End date (inclusive), open-ended when absent
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Open-ended range from `start` onward
    pub fn from(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// Closed range between `start` and `end`, both inclusive
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Parse a range from raw path parameters.
    pub fn parse(start: &str, end: Option<&str>) -> ClimateResult<Self> {
        Ok(Self {
            start: parse_date(start)?,
            end: end.map(parse_date).transpose()?,
        })
    }

    /// Whether `date` falls inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.map_or(true, |end| date <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_valid_date() {
        assert_eq!(parse_date("2017-08-23").unwrap(), d("2017-08-23"));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(parse_date("08-23-2017").is_err());
        assert!(parse_date("2017-13-01").is_err());
        assert!(parse_date("not-a-date").is_err());

        let err = parse_date("nope").unwrap_err();
        assert_eq!(err.category(), "invalid_date");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_open_range_contains() {
        let range = DateRange::from(d("2017-01-01"));
        assert!(range.contains(d("2017-01-01")));
        assert!(range.contains(d("2018-06-15")));
        assert!(!range.contains(d("2016-12-31")));
    }

    #[test]
    fn test_closed_range_is_inclusive_on_both_ends() {
        let range = DateRange::between(d("2017-01-01"), d("2017-01-31"));
        assert!(range.contains(d("2017-01-01")));
        assert!(range.contains(d("2017-01-31")));
        assert!(!range.contains(d("2017-02-01")));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let range = DateRange::parse("2017-08-23", Some("2017-08-22")).unwrap();
        assert!(!range.contains(d("2017-08-22")));
        assert!(!range.contains(d("2017-08-23")));
    }
}
