//! Alert aggregation: merge spike and change-point detections into one
//! deduplicated, chronologically ordered report.

use crate::changepoint::{detect_change_points, CostModel};
use crate::core::TimeSeries;
use crate::detection::{detect_spikes, SpikeConfig};
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

/// Kind of alert raised on a point of the series.
///
/// Ordering is alphabetical by the string form (`change_point` before
/// `spike`), which fixes the tie-break between types sharing a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlertType {
    /// PELT segmentation found a regime shift at this date.
    ChangePoint,
    /// Rolling z-score exceeded the threshold at this date.
    Spike,
}

impl AlertType {
    /// String form used in the report artifact.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Spike => "spike",
            AlertType::ChangePoint => "change_point",
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dated alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    pub date: DateTime<Utc>,
    pub alert_type: AlertType,
}

/// An ordered collection of alerts: ascending by date, no duplicate
/// `(date, alert_type)` pairs, deterministic tie-break between types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertReport {
    alerts: Vec<Alert>,
}

impl AlertReport {
    /// Build a report from raw spike and change-point timestamps.
    ///
    /// Duplicates of the same `(date, type)` pair are suppressed; a date
    /// flagged by both detectors keeps both records, since they are
    /// different alert types.
    pub fn from_detections(
        spikes: Vec<DateTime<Utc>>,
        change_points: Vec<DateTime<Utc>>,
    ) -> Self {
        let mut records: BTreeSet<(DateTime<Utc>, AlertType)> = BTreeSet::new();
        for date in spikes {
            records.insert((date, AlertType::Spike));
        }
        for date in change_points {
            records.insert((date, AlertType::ChangePoint));
        }

        let alerts = records
            .into_iter()
            .map(|(date, alert_type)| Alert { date, alert_type })
            .collect();

        Self { alerts }
    }

    /// Get the alerts, sorted ascending by date.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Number of alerts.
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// Check if the report is empty.
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Iterate over the alerts in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    /// Alerts of one type, in report order.
    pub fn of_type(&self, alert_type: AlertType) -> Vec<Alert> {
        self.alerts
            .iter()
            .copied()
            .filter(|a| a.alert_type == alert_type)
            .collect()
    }

    /// Write the report as CSV: header `date,alert_type`, ISO-8601 dates,
    /// no index column. An empty report writes the header only.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["date", "alert_type"])?;
        for alert in &self.alerts {
            wtr.write_record([
                alert.date.format("%Y-%m-%d").to_string(),
                alert.alert_type.as_str().to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the report CSV to a file path.
    pub fn write_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

/// Parameters for the combined alerting pipeline.
///
/// Defaults mirror the production pipeline: a 12-period window with a
/// 3-sigma threshold for spikes, RBF cost with penalty 10 for change
/// points.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertConfig {
    pub window: usize,
    pub z_thresh: f64,
    pub cost_model: CostModel,
    pub penalty: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            window: 12,
            z_thresh: 3.0,
            cost_model: CostModel::Rbf,
            penalty: 10.0,
        }
    }
}

impl AlertConfig {
    pub fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn z_thresh(mut self, z_thresh: f64) -> Self {
        self.z_thresh = z_thresh;
        self
    }

    pub fn cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    pub fn penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }
}

/// Run both detectors and merge their findings into one report.
///
/// Detector failures propagate unmodified; no fallback substitution.
/// A series with no spikes and no change points produces an empty
/// report, not an error.
pub fn generate_alerts_report(series: &TimeSeries, config: &AlertConfig) -> Result<AlertReport> {
    let spike_config = SpikeConfig::new(config.window, config.z_thresh);
    let spikes = detect_spikes(series, &spike_config)?;
    let change_points = detect_change_points(series, config.cost_model, config.penalty)?;

    Ok(AlertReport::from_detections(spikes, change_points))
}
