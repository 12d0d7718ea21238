//! Quickstart example demonstrating the full complaints-forecast pipeline.
//!
//! Run with: cargo run --example quickstart

use chrono::{TimeZone, Utc};
use complaints_forecast::alerts::{generate_alerts_report, AlertConfig};
use complaints_forecast::changepoint::CostModel;
use complaints_forecast::core::TimeSeries;
use complaints_forecast::ingest::train_test_split;
use complaints_forecast::models::{Forecaster, MovingAverage, Naive, SeasonalNaive};
use complaints_forecast::utils::evaluate_forecasts;

fn main() {
    println!("=== complaints-forecast Quickstart ===\n");

    // 1. Build a synthetic monthly complaint-count series: four years of
    // seasonal volume with a regime shift in year three and one burst month
    let n = 48;
    let timestamps: Vec<_> = (0..n)
        .map(|i| {
            let year = 2020 + (i / 12) as i32;
            let month = 1 + (i % 12) as u32;
            Utc.with_ymd_and_hms(year, month, 28, 0, 0, 0).unwrap()
        })
        .collect();
    let values: Vec<f64> = (0..n)
        .map(|i| {
            let base = if i < 24 { 120.0 } else { 220.0 }; // shift at month 24
            let seasonal = 20.0 * ((i % 12) as f64 * std::f64::consts::TAU / 12.0).sin();
            let burst = if i == 9 { 180.0 } else { 0.0 }; // October 2020 spike
            (base + seasonal + burst).round()
        })
        .collect();

    let series = TimeSeries::new(timestamps, values).unwrap();
    println!("Created monthly series with {} observations", series.len());

    // 2. Detect spikes and change points, merge into one report
    println!("\n--- Alert Report ---");
    let config = AlertConfig::default()
        .window(6)
        .z_thresh(2.5)
        .cost_model(CostModel::Rbf)
        .penalty(10.0);
    let report = generate_alerts_report(&series, &config).unwrap();

    println!("{} alerts found:", report.len());
    for alert in report.iter() {
        println!("  {}  {}", alert.date.format("%Y-%m-%d"), alert.alert_type);
    }

    let mut csv_buf = Vec::new();
    report.write_csv(&mut csv_buf).unwrap();
    println!("\nReport CSV:\n{}", String::from_utf8(csv_buf).unwrap());

    // 3. Hold out the last year and score the baseline forecasters
    println!("--- Baseline Forecast Comparison (12-month holdout) ---");
    let (train, test) = train_test_split(&series, 12).unwrap();

    let mut models: Vec<Box<dyn Forecaster>> = vec![
        Box::new(Naive::new()),
        Box::new(SeasonalNaive::default()),
        Box::new(MovingAverage::new(6)),
    ];

    let mut predictions = Vec::new();
    for model in &mut models {
        model.fit(&train).unwrap();
        let forecast = model.predict(test.len()).unwrap();
        predictions.push((model.name().to_string(), forecast.point().to_vec()));
    }

    let scores = evaluate_forecasts(test.values(), &predictions).unwrap();
    println!("{:>16} {:>10} {:>10} {:>10}", "model", "MAE", "RMSE", "SMAPE");
    for score in &scores {
        println!(
            "{:>16} {:>10.2} {:>10.2} {:>9.2}%",
            score.model, score.metrics.mae, score.metrics.rmse, score.metrics.smape
        );
    }

    // 4. Forecast with intervals from the best simple model
    println!("\n--- Naive Forecast with 95% Intervals (6 months) ---");
    let mut naive = Naive::new();
    naive.fit(&series).unwrap();
    let forecast = naive.predict_with_intervals(6, 0.95).unwrap();
    let lower = forecast.lower().unwrap();
    let upper = forecast.upper().unwrap();

    println!("{:>4} {:>10} {:>10} {:>10}", "h", "lower", "point", "upper");
    for (i, point) in forecast.point().iter().enumerate() {
        println!(
            "{:>4} {:>10.1} {:>10.1} {:>10.1}",
            i + 1,
            lower[i],
            point,
            upper[i]
        );
    }

    println!("\n=== Quickstart Complete ===");
}
