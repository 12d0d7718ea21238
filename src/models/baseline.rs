//! Baseline forecasting models: naive, seasonal naive, moving average.
//!
//! These are the in-tree reference models the complaint pipeline scores
//! against; heavier models (ARIMA, Prophet, neural nets) live outside
//! this crate.

use crate::core::{Forecast, TimeSeries};
use crate::error::{ComplaintError, Result};
use crate::models::Forecaster;
use crate::utils::stats::quantile_normal;

/// Naive forecaster that repeats the last observed value.
#[derive(Debug, Clone, Default)]
pub struct Naive {
    last_value: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl Naive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Forecaster for Naive {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        if values.is_empty() {
            return Err(ComplaintError::EmptyData);
        }

        self.last_value = Some(*values.last().unwrap());

        // Fitted values are shifted history (y_hat[t] = y[t-1])
        let mut fitted = Vec::with_capacity(values.len());
        fitted.push(f64::NAN);
        fitted.extend_from_slice(&values[..values.len() - 1]);
        self.fitted = Some(fitted);

        // Residuals are first differences
        let residuals: Vec<f64> = (0..values.len())
            .map(|i| {
                if i == 0 {
                    f64::NAN
                } else {
                    values[i] - values[i - 1]
                }
            })
            .collect();
        self.residuals = Some(residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let last = self.last_value.ok_or(ComplaintError::FitRequired)?;
        Ok(Forecast::from_values(vec![last; horizon]))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let last = self.last_value.ok_or(ComplaintError::FitRequired)?;
        let residuals = self.residuals.as_ref().ok_or(ComplaintError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let valid: Vec<f64> = residuals.iter().copied().filter(|r| !r.is_nan()).collect();
        if valid.is_empty() {
            return Ok(Forecast::from_values(vec![last; horizon]));
        }

        let n = valid.len() as f64;
        let variance = valid.iter().map(|r| r * r).sum::<f64>() / n;
        let sigma = variance.sqrt();
        let z = quantile_normal((1.0 + level) / 2.0);

        let mut point = Vec::with_capacity(horizon);
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for h in 1..=horizon {
            // Interval widens with sqrt(horizon)
            let se = sigma * (h as f64).sqrt();
            point.push(last);
            lower.push(last - z * se);
            upper.push(last + z * se);
        }

        Ok(Forecast::from_values_with_intervals(point, lower, upper))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "Naive"
    }
}

/// Seasonal naive forecaster: repeats the value from the same season in
/// the previous cycle.
#[derive(Debug, Clone)]
pub struct SeasonalNaive {
    period: usize,
    history: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl SeasonalNaive {
    /// Create a new model with the given seasonal period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            history: None,
            fitted: None,
            residuals: None,
        }
    }

    /// Get the seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for SeasonalNaive {
    fn default() -> Self {
        Self::new(12) // Monthly seasonality
    }
}

impl Forecaster for SeasonalNaive {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        if self.period == 0 {
            return Err(ComplaintError::InvalidParameter(
                "seasonal period must be positive".to_string(),
            ));
        }

        let values = series.values();
        if values.len() < self.period {
            return Err(ComplaintError::InsufficientData {
                needed: self.period,
                got: values.len(),
            });
        }

        self.history = Some(values.to_vec());

        let fitted: Vec<f64> = (0..values.len())
            .map(|i| {
                if i < self.period {
                    f64::NAN
                } else {
                    values[i - self.period]
                }
            })
            .collect();
        let residuals: Vec<f64> = (0..values.len())
            .map(|i| {
                if i < self.period {
                    f64::NAN
                } else {
                    values[i] - values[i - self.period]
                }
            })
            .collect();

        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let history = self.history.as_ref().ok_or(ComplaintError::FitRequired)?;

        let last_cycle = &history[history.len() - self.period..];
        let predictions: Vec<f64> = (0..horizon).map(|h| last_cycle[h % self.period]).collect();

        Ok(Forecast::from_values(predictions))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "SeasonalNaive"
    }
}

/// Moving-average forecaster: predicts the mean of the last `window`
/// observations. A window of 0 uses the entire history.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window: usize,
    last_mean: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl MovingAverage {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            last_mean: None,
            fitted: None,
            residuals: None,
        }
    }

    /// Get the window size.
    pub fn window(&self) -> usize {
        self.window
    }

    fn mean_ending_at(&self, values: &[f64], end: usize) -> f64 {
        let width = if self.window == 0 || self.window > end {
            end
        } else {
            self.window
        };
        if width == 0 {
            return f64::NAN;
        }
        values[end - width..end].iter().sum::<f64>() / width as f64
    }
}

impl Forecaster for MovingAverage {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        if values.is_empty() {
            return Err(ComplaintError::EmptyData);
        }

        // Fitted values: mean of the window ending just before t
        let fitted: Vec<f64> = (0..values.len())
            .map(|t| self.mean_ending_at(values, t))
            .collect();
        let residuals: Vec<f64> = values
            .iter()
            .zip(fitted.iter())
            .map(|(y, f)| y - f)
            .collect();

        self.last_mean = Some(self.mean_ending_at(values, values.len()));
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let mean = self.last_mean.ok_or(ComplaintError::FitRequired)?;
        Ok(Forecast::from_values(vec![mean; horizon]))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "MovingAverage"
    }
}
