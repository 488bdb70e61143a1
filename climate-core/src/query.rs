//! Typed query results produced by the query engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One precipitation reading, projected from an observation row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipReading {
    pub date: NaiveDate,
    pub precipitation: Option<f64>,
}

/// One temperature reading, projected from an observation row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TobsReading {
    pub date: NaiveDate,
    pub temperature: Option<f64>,
}

/// Min/avg/max of temperature over a date-bounded subset of observations.
///
/// All three fields are `None` when no non-null temperature matched the
/// range; an empty match is a valid result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TempSummary {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TempSummary {
    /// Fold non-null temperatures into a summary.
    ///
    /// The average is the plain arithmetic mean, unrounded; formatting
    /// is a response-shaping concern.
    pub fn from_temperatures<I>(temps: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;

        for temp in temps.into_iter().flatten() {
            min = min.min(temp);
            max = max.max(temp);
            sum += temp;
            count += 1;
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            min: Some(min),
            avg: Some(sum / count as f64),
            max: Some(max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_ignores_nulls() {
        let summary =
            TempSummary::from_temperatures(vec![Some(58.0), Some(60.0), None, Some(62.0)]);
        assert_eq!(summary.min, Some(58.0));
        assert_eq!(summary.avg, Some(60.0));
        assert_eq!(summary.max, Some(62.0));
    }

    #[test]
    fn test_summary_of_empty_input_is_all_none() {
        let summary = TempSummary::from_temperatures(Vec::<Option<f64>>::new());
        assert!(summary.is_empty());

        let all_null = TempSummary::from_temperatures(vec![None, None]);
        assert!(all_null.is_empty());
    }

    #[test]
    fn test_min_avg_max_ordering() {
        let summary = TempSummary::from_temperatures(vec![Some(71.2), Some(64.9), Some(80.3)]);
        let (min, avg, max) = (
            summary.min.unwrap(),
            summary.avg.unwrap(),
            summary.max.unwrap(),
        );
        assert!(min <= avg && avg <= max);
    }

    #[test]
    fn test_single_value_summary() {
        let summary = TempSummary::from_temperatures(vec![Some(72.0)]);
        assert_eq!(summary.min, Some(72.0));
        assert_eq!(summary.avg, Some(72.0));
        assert_eq!(summary.max, Some(72.0));
    }
}
