//! Utility functions shared by the detectors and models.

pub mod metrics;
pub mod stats;

pub use metrics::{calculate_metrics, evaluate_forecasts, AccuracyMetrics, ModelScore};
pub use stats::{mean, median, population_std, quantile_normal};
