//! Baseline forecasting models.

pub mod baseline;
mod traits;

pub use baseline::{MovingAverage, Naive, SeasonalNaive};
pub use traits::Forecaster;
