//! Calendar features and lag-supervised reshaping.

use crate::core::TimeSeries;
use chrono::Datelike;

/// Calendar features derived from one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFeatures {
    /// Month of year, 1-12.
    pub month: u32,
    /// Day of week, Monday = 0.
    pub day_of_week: u32,
    /// ISO week of year, 1-53.
    pub week_of_year: u32,
}

/// Derive calendar features for every observation of a series.
pub fn time_features(series: &TimeSeries) -> Vec<TimeFeatures> {
    series
        .timestamps()
        .iter()
        .map(|t| TimeFeatures {
            month: t.month(),
            day_of_week: t.weekday().num_days_from_monday(),
            week_of_year: t.iso_week().week(),
        })
        .collect()
}

/// Turn a univariate signal into supervised-learning rows
/// `[y_t, y_{t-1}, ..., y_{t-lags}]`.
///
/// Rows without a full lag history are dropped, so the output has
/// `len - lags` rows (empty when the signal is too short).
pub fn lag_matrix(values: &[f64], lags: usize) -> Vec<Vec<f64>> {
    if values.len() <= lags {
        return Vec::new();
    }

    (lags..values.len())
        .map(|t| (0..=lags).map(|lag| values[t - lag]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn features_follow_the_calendar() {
        let timestamps = vec![
            Utc.with_ymd_and_hms(2020, 1, 31, 0, 0, 0).unwrap(), // Friday
            Utc.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap(), // Saturday
        ];
        let series = TimeSeries::new(timestamps, vec![1.0, 2.0]).unwrap();

        let features = time_features(&series);

        assert_eq!(features[0].month, 1);
        assert_eq!(features[0].day_of_week, 4);
        assert_eq!(features[0].week_of_year, 5);
        assert_eq!(features[1].month, 2);
        assert_eq!(features[1].day_of_week, 5);
    }

    #[test]
    fn lag_matrix_drops_incomplete_rows() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let rows = lag_matrix(&values, 2);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![3.0, 2.0, 1.0]);
        assert_eq!(rows[1], vec![4.0, 3.0, 2.0]);
        assert_eq!(rows[2], vec![5.0, 4.0, 3.0]);
    }

    #[test]
    fn lag_matrix_zero_lags_is_identity_column() {
        let values = vec![1.0, 2.0];
        let rows = lag_matrix(&values, 0);
        assert_eq!(rows, vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn lag_matrix_short_signal_is_empty() {
        assert!(lag_matrix(&[1.0, 2.0], 2).is_empty());
        assert!(lag_matrix(&[], 1).is_empty());
    }
}
