//! # complaints-forecast
//!
//! Forecasting and alerting for monthly consumer-complaint counts.
//!
//! Ingests raw complaint records, resamples them into a monthly count
//! series, fits baseline forecasting models, and flags anomalous points
//! with a two-method alerting pipeline: rolling z-score spike detection
//! combined with PELT change-point segmentation, merged into one
//! deduplicated, chronologically ordered alert report.

pub mod alerts;
pub mod changepoint;
pub mod core;
pub mod detection;
pub mod error;
pub mod features;
pub mod ingest;
pub mod models;
pub mod utils;

pub use error::{ComplaintError, Result};

pub mod prelude {
    pub use crate::alerts::{generate_alerts_report, Alert, AlertConfig, AlertReport, AlertType};
    pub use crate::changepoint::{detect_change_points, CostModel};
    pub use crate::core::{Forecast, TimeSeries};
    pub use crate::detection::{detect_spikes, SpikeConfig};
    pub use crate::error::{ComplaintError, Result};
    pub use crate::models::Forecaster;
    pub use crate::utils::{calculate_metrics, AccuracyMetrics};
}
