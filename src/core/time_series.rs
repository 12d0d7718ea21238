//! TimeSeries data structure for date-indexed count data.

use crate::error::{ComplaintError, Result};
use chrono::{DateTime, Utc};

/// A univariate time series of timestamped values.
///
/// Timestamps are strictly increasing; duplicates are rejected at
/// construction. Values and timestamps always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a new time series from parallel timestamp/value vectors.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if values.len() != timestamps.len() {
            return Err(ComplaintError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }

        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(ComplaintError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        Ok(Self { timestamps, values })
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the timestamp at an index.
    pub fn timestamp(&self, index: usize) -> Option<DateTime<Utc>> {
        self.timestamps.get(index).copied()
    }

    /// Iterate over `(timestamp, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Extract a sub-series over `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end {
            return Err(ComplaintError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(ComplaintError::InvalidParameter(format!(
                "slice end {} out of bounds (len {})",
                end,
                self.len()
            )));
        }

        Ok(TimeSeries {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_timestamps(n: usize) -> Vec<DateTime<Utc>> {
        (0..n)
            .map(|i| {
                Utc.with_ymd_and_hms(2020, 1 + (i % 12) as u32, 1, 0, 0, 0)
                    .unwrap()
                    + chrono::Duration::days(365 * (i / 12) as i64)
            })
            .collect()
    }

    #[test]
    fn constructs_and_exposes_data() {
        let timestamps = make_timestamps(5);
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        let ts = TimeSeries::new(timestamps.clone(), values.clone()).unwrap();

        assert_eq!(ts.len(), 5);
        assert!(!ts.is_empty());
        assert_eq!(ts.values(), &values[..]);
        assert_eq!(ts.timestamps(), &timestamps[..]);
        assert_eq!(ts.timestamp(2), Some(timestamps[2]));
        assert_eq!(ts.timestamp(5), None);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let timestamps = make_timestamps(3);
        let result = TimeSeries::new(timestamps, vec![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(ComplaintError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn rejects_non_increasing_timestamps() {
        let t0 = Utc.with_ymd_and_hms(2020, 1, 31, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap();

        // Goes backward
        let result = TimeSeries::new(vec![t0, t1, t0], vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(ComplaintError::TimestampError(_))));

        // Duplicate
        let result = TimeSeries::new(vec![t0, t1, t1], vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(ComplaintError::TimestampError(_))));
    }

    #[test]
    fn slice_returns_sub_series() {
        let ts = TimeSeries::new(make_timestamps(5), vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        let sub = ts.slice(1, 4).unwrap();
        assert_eq!(sub.len(), 3);
        assert_eq!(sub.values(), &[2.0, 3.0, 4.0]);
        assert_eq!(sub.timestamps()[0], ts.timestamps()[1]);

        assert!(ts.slice(3, 2).is_err());
        assert!(ts.slice(0, 6).is_err());
    }

    #[test]
    fn empty_series_is_valid() {
        let ts = TimeSeries::new(vec![], vec![]).unwrap();
        assert!(ts.is_empty());
        assert_eq!(ts.len(), 0);
    }
}
