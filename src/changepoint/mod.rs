//! Change-point detection via penalized optimal partitioning.
//!
//! Finds indices where the underlying statistical regime of a count
//! series shifts, using an exact PELT search over one of three segment
//! cost models (`l1`, `l2`, `rbf`).

pub mod cost;
pub mod pelt;

pub use cost::{l1_cost, l2_cost, total_cost, CostModel, SegmentCost};
pub use pelt::{pelt_detect, PeltConfig, PeltResult};

use crate::core::TimeSeries;
use crate::error::{ComplaintError, Result};
use chrono::{DateTime, Utc};

/// Detect change points in a series with the PELT algorithm.
///
/// Returns the timestamps of interior breakpoints, ascending. The
/// end-of-series boundary produced by the segmentation is excluded:
/// only true regime shifts are reported. Series too short to segment
/// (length <= 2) yield an empty list.
pub fn detect_change_points(
    series: &TimeSeries,
    cost_model: CostModel,
    penalty: f64,
) -> Result<Vec<DateTime<Utc>>> {
    if penalty < 0.0 {
        return Err(ComplaintError::InvalidParameter(
            "penalty must be non-negative".to_string(),
        ));
    }
    if series.is_empty() {
        return Err(ComplaintError::EmptyData);
    }

    let config = PeltConfig::default().cost_model(cost_model).penalty(penalty);
    let result = pelt_detect(series.values(), &config);

    // Interior indices map directly to timestamps; the sentinel index n
    // never appears in `changepoints` by construction.
    Ok(result
        .changepoints
        .iter()
        .map(|&i| series.timestamps()[i])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn monthly_series(values: &[f64]) -> TimeSeries {
        let timestamps: Vec<DateTime<Utc>> = (0..values.len())
            .map(|i| {
                let year = 2019 + (i / 12) as i32;
                let month = 1 + (i % 12) as u32;
                Utc.with_ymd_and_hms(year, month, 28, 0, 0, 0).unwrap()
            })
            .collect();
        TimeSeries::new(timestamps, values.to_vec()).unwrap()
    }

    #[test]
    fn level_shift_maps_to_timestamp() {
        let mut values = vec![2.0; 12];
        values.extend(vec![20.0; 12]);
        let series = monthly_series(&values);

        let breaks = detect_change_points(&series, CostModel::L2, 2.0).unwrap();

        assert_eq!(breaks, vec![series.timestamps()[12]]);
    }

    #[test]
    fn flat_series_yields_no_change_points() {
        let series = monthly_series(&[3.0; 24]);
        let breaks = detect_change_points(&series, CostModel::Rbf, 10.0).unwrap();
        assert!(breaks.is_empty());
    }

    #[test]
    fn tiny_series_yields_no_change_points() {
        for n in 1..=2 {
            let series = monthly_series(&vec![1.0; n]);
            let breaks = detect_change_points(&series, CostModel::L2, 1.0).unwrap();
            assert!(breaks.is_empty());
        }
    }

    #[test]
    fn empty_series_is_an_error() {
        let series = TimeSeries::new(vec![], vec![]).unwrap();
        let result = detect_change_points(&series, CostModel::L2, 1.0);
        assert!(matches!(result, Err(ComplaintError::EmptyData)));
    }

    #[test]
    fn negative_penalty_fails_fast() {
        let series = monthly_series(&[1.0; 10]);
        let result = detect_change_points(&series, CostModel::L2, -1.0);
        assert!(matches!(result, Err(ComplaintError::InvalidParameter(_))));
    }

    #[test]
    fn sentinel_is_never_reported() {
        let mut values = vec![1.0; 10];
        values.extend(vec![50.0; 10]);
        let series = monthly_series(&values);
        let last = *series.timestamps().last().unwrap();

        for penalty in [0.0, 0.5, 5.0, 500.0] {
            let breaks = detect_change_points(&series, CostModel::L2, penalty).unwrap();
            // Interior breaks only: strictly before the final observation
            assert!(breaks.iter().all(|&b| b < last));
            assert!(breaks.iter().all(|b| series.timestamps().contains(b)));
        }
    }

    #[test]
    fn breaks_are_ascending() {
        let values: Vec<f64> = (0..48)
            .map(|i| match i / 12 {
                0 => 1.0,
                1 => 10.0,
                2 => 3.0,
                _ => 15.0,
            })
            .collect();
        let series = monthly_series(&values);

        let breaks = detect_change_points(&series, CostModel::L2, 1.0).unwrap();
        assert!(breaks.windows(2).all(|w| w[0] < w[1]));
        assert!(!breaks.is_empty());
    }
}
