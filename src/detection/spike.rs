//! Rolling z-score spike detection.
//!
//! A point is a spike when it deviates from its local windowed mean by
//! more than `z_thresh` local standard deviations.

use crate::core::TimeSeries;
use crate::error::{ComplaintError, Result};
use crate::utils::stats::{mean, population_std};
use chrono::{DateTime, Utc};

/// Configuration for spike detection.
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeConfig {
    /// Rolling window radius in periods: statistics at index `i` are taken
    /// over `[i - window, i + window]`, clipped at the series boundaries.
    pub window: usize,
    /// Absolute z-score threshold to flag a spike.
    pub z_thresh: f64,
}

impl Default for SpikeConfig {
    fn default() -> Self {
        Self {
            window: 12,
            z_thresh: 3.0,
        }
    }
}

impl SpikeConfig {
    /// Create a config with the given window and threshold.
    pub fn new(window: usize, z_thresh: f64) -> Self {
        Self { window, z_thresh }
    }

    /// Set the window radius.
    pub fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the z-score threshold.
    pub fn z_thresh(mut self, z_thresh: f64) -> Self {
        self.z_thresh = z_thresh;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(ComplaintError::InvalidParameter(
                "window must be positive".to_string(),
            ));
        }
        if !(self.z_thresh > 0.0) {
            return Err(ComplaintError::InvalidParameter(
                "z_thresh must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Compute the centered rolling z-score for every point.
///
/// The window shrinks near the series boundaries; one observation is
/// always available. Standard deviation is the population form (divide
/// by N). Points whose local window has zero standard deviation get a
/// z-score of 0.0: a flat neighborhood is never a spike, regardless of
/// floating-point division artifacts.
pub fn spike_z_scores(series: &TimeSeries, config: &SpikeConfig) -> Result<Vec<f64>> {
    config.validate()?;

    let values = series.values();
    if values.is_empty() {
        return Err(ComplaintError::EmptyData);
    }

    let n = values.len();
    let mut z_scores = Vec::with_capacity(n);

    for i in 0..n {
        let start = i.saturating_sub(config.window);
        let end = (i + config.window + 1).min(n);
        let window = &values[start..end];

        let m = mean(window);
        let sd = population_std(window);

        // Zero local spread: defined no-spike case, not a division
        if sd < 1e-12 {
            z_scores.push(0.0);
        } else {
            z_scores.push((values[i] - m) / sd);
        }
    }

    Ok(z_scores)
}

/// Identify timestamps where the rolling z-score exceeds the threshold.
///
/// Returns spike timestamps in original series order.
pub fn detect_spikes(series: &TimeSeries, config: &SpikeConfig) -> Result<Vec<DateTime<Utc>>> {
    let z_scores = spike_z_scores(series, config)?;

    Ok(z_scores
        .iter()
        .enumerate()
        .filter(|(_, z)| z.abs() > config.z_thresh)
        .map(|(i, _)| series.timestamps()[i])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn monthly_series(values: &[f64]) -> TimeSeries {
        let timestamps: Vec<DateTime<Utc>> = (0..values.len())
            .map(|i| {
                let year = 2020 + (i / 12) as i32;
                let month = 1 + (i % 12) as u32;
                Utc.with_ymd_and_hms(year, month, 28, 0, 0, 0).unwrap()
            })
            .collect();
        TimeSeries::new(timestamps, values.to_vec()).unwrap()
    }

    #[test]
    fn flat_series_has_no_spikes() {
        let series = monthly_series(&[1.0; 10]);
        let config = SpikeConfig::new(3, 0.5);
        let spikes = detect_spikes(&series, &config).unwrap();
        assert!(spikes.is_empty());
    }

    #[test]
    fn single_large_spike_is_isolated() {
        let mut values = vec![1.0; 10];
        values[5] = 10.0;
        let series = monthly_series(&values);

        let config = SpikeConfig::new(3, 2.0);
        let spikes = detect_spikes(&series, &config).unwrap();

        assert_eq!(spikes, vec![series.timestamps()[5]]);
    }

    #[test]
    fn spike_z_score_magnitude() {
        let mut values = vec![1.0; 10];
        values[5] = 10.0;
        let series = monthly_series(&values);

        let z = spike_z_scores(&series, &SpikeConfig::new(3, 2.0)).unwrap();

        // Window at index 5 covers indices 2..=8: six 1s and one 10.
        // mean = 16/7, population std = sqrt(9.9184) -> z ~ 2.449
        assert!(z[5] > 2.4 && z[5] < 2.5);
        // Neighbors stay well below threshold
        assert!(z[4].abs() < 1.0);
        assert!(z[6].abs() < 1.0);
    }

    #[test]
    fn negative_spike_is_flagged_too() {
        let mut values = vec![10.0; 12];
        values[6] = 1.0;
        let series = monthly_series(&values);

        let spikes = detect_spikes(&series, &SpikeConfig::new(3, 2.0)).unwrap();
        assert_eq!(spikes, vec![series.timestamps()[6]]);
    }

    #[test]
    fn single_point_series_yields_no_spikes() {
        let series = monthly_series(&[42.0]);
        let spikes = detect_spikes(&series, &SpikeConfig::default()).unwrap();
        assert!(spikes.is_empty());
    }

    #[test]
    fn empty_series_is_an_error() {
        let series = TimeSeries::new(vec![], vec![]).unwrap();
        let result = detect_spikes(&series, &SpikeConfig::default());
        assert!(matches!(result, Err(ComplaintError::EmptyData)));
    }

    #[test]
    fn invalid_parameters_fail_fast() {
        let series = monthly_series(&[1.0, 2.0, 3.0]);

        let result = detect_spikes(&series, &SpikeConfig::new(0, 2.0));
        assert!(matches!(result, Err(ComplaintError::InvalidParameter(_))));

        let result = detect_spikes(&series, &SpikeConfig::new(3, 0.0));
        assert!(matches!(result, Err(ComplaintError::InvalidParameter(_))));

        let result = detect_spikes(&series, &SpikeConfig::new(3, -1.0));
        assert!(matches!(result, Err(ComplaintError::InvalidParameter(_))));
    }

    #[test]
    fn input_is_not_mutated_and_detection_is_deterministic() {
        let mut values = vec![2.0; 20];
        values[10] = 40.0;
        let series = monthly_series(&values);
        let before = series.clone();

        let config = SpikeConfig::new(4, 2.0);
        let first = detect_spikes(&series, &config).unwrap();
        let second = detect_spikes(&series, &config).unwrap();

        assert_eq!(series, before);
        assert_eq!(first, second);
    }
}
