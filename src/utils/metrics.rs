//! Accuracy metrics for forecast evaluation.

use crate::error::{ComplaintError, Result};

/// Accuracy metrics for evaluating forecast performance.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error (None if zeros in actual)
    pub mape: Option<f64>,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
}

/// Named metric row produced by [`evaluate_forecasts`].
#[derive(Debug, Clone)]
pub struct ModelScore {
    pub model: String,
    pub metrics: AccuracyMetrics,
}

/// Calculate accuracy metrics between actual and predicted values.
pub fn calculate_metrics(actual: &[f64], predicted: &[f64]) -> Result<AccuracyMetrics> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(ComplaintError::EmptyData);
    }

    if actual.len() != predicted.len() {
        return Err(ComplaintError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }

    let n = actual.len() as f64;

    let mae: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n;

    let mse: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / n;

    let rmse = mse.sqrt();

    // MAPE is undefined when actuals contain zeros
    let mape = if actual.contains(&0.0) {
        None
    } else {
        let sum: f64 = actual
            .iter()
            .zip(predicted.iter())
            .map(|(a, p)| ((a - p) / a).abs())
            .sum();
        Some(100.0 * sum / n)
    };

    let smape: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| {
            let denom = a.abs() + p.abs();
            if denom == 0.0 {
                0.0
            } else {
                2.0 * (a - p).abs() / denom
            }
        })
        .sum::<f64>()
        * 100.0
        / n;

    Ok(AccuracyMetrics {
        mae,
        mse,
        rmse,
        mape,
        smape,
    })
}

/// Compare multiple named forecast arrays against the true values.
///
/// Prediction sets containing NaN (e.g. a model that failed upstream) are
/// skipped rather than scored.
pub fn evaluate_forecasts(actual: &[f64], predictions: &[(String, Vec<f64>)]) -> Result<Vec<ModelScore>> {
    if actual.is_empty() {
        return Err(ComplaintError::EmptyData);
    }

    let mut scores = Vec::new();
    for (name, pred) in predictions {
        if pred.iter().any(|v| v.is_nan()) {
            continue;
        }
        let metrics = calculate_metrics(actual, pred)?;
        scores.push(ModelScore {
            model: name.clone(),
            metrics,
        });
    }

    Ok(scores)
}
