//! Command-line interface for the complaints-forecast pipeline.

use clap::{Parser, Subcommand};
use complaints_forecast::alerts::{generate_alerts_report, AlertConfig};
use complaints_forecast::changepoint::CostModel;
use complaints_forecast::error::Result;
use complaints_forecast::ingest::{load_complaints_csv, resample_monthly, DEFAULT_DATE_COLUMN};
use complaints_forecast::models::{Forecaster, MovingAverage, Naive, SeasonalNaive};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "complaints-alerts")]
#[command(about = "Monthly complaint-count alerting and forecasting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect spikes and change points, write an alert report CSV
    Report {
        /// Input complaints CSV (one row per complaint)
        #[arg(short, long)]
        input: PathBuf,

        /// Name of the date column
        #[arg(long, default_value = DEFAULT_DATE_COLUMN)]
        date_column: String,

        /// Rolling window radius for spike detection (periods)
        #[arg(short, long, default_value = "12")]
        window: usize,

        /// Absolute z-score threshold for spikes
        #[arg(short, long, default_value = "3.0")]
        z_thresh: f64,

        /// Cost model for change-point detection (l1, l2, rbf)
        #[arg(short, long, default_value = "rbf")]
        model: String,

        /// Penalty per change point (higher = fewer breaks)
        #[arg(short, long, default_value = "10.0")]
        penalty: f64,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Forecast future monthly complaint counts with a baseline model
    Forecast {
        /// Input complaints CSV (one row per complaint)
        #[arg(short, long)]
        input: PathBuf,

        /// Name of the date column
        #[arg(long, default_value = DEFAULT_DATE_COLUMN)]
        date_column: String,

        /// Number of months to forecast
        #[arg(short, long, default_value = "3")]
        steps: usize,

        /// Model (naive, seasonal, ma)
        #[arg(short, long, default_value = "naive")]
        model: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            input,
            date_column,
            window,
            z_thresh,
            model,
            penalty,
            output,
        } => run_report(input, &date_column, window, z_thresh, &model, penalty, output),
        Commands::Forecast {
            input,
            date_column,
            steps,
            model,
        } => run_forecast(input, &date_column, steps, &model),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run_report(
    input: PathBuf,
    date_column: &str,
    window: usize,
    z_thresh: f64,
    model: &str,
    penalty: f64,
    output: Option<PathBuf>,
) -> Result<()> {
    let cost_model: CostModel = model.parse()?;

    let dates = load_complaints_csv(&input, date_column)?;
    let series = resample_monthly(&dates)?;

    let config = AlertConfig::default()
        .window(window)
        .z_thresh(z_thresh)
        .cost_model(cost_model)
        .penalty(penalty);
    let report = generate_alerts_report(&series, &config)?;

    match output {
        Some(path) => {
            report.write_csv_path(&path)?;
            println!(
                "{} alerts over {} monthly periods written to {}",
                report.len(),
                series.len(),
                path.display()
            );
        }
        None => {
            report.write_csv(std::io::stdout().lock())?;
        }
    }

    Ok(())
}

fn run_forecast(input: PathBuf, date_column: &str, steps: usize, model: &str) -> Result<()> {
    let dates = load_complaints_csv(&input, date_column)?;
    let series = resample_monthly(&dates)?;

    let mut forecaster: Box<dyn Forecaster> = match model {
        "naive" => Box::new(Naive::new()),
        "seasonal" => Box::new(SeasonalNaive::default()),
        "ma" => Box::new(MovingAverage::new(3)),
        other => {
            return Err(complaints_forecast::ComplaintError::InvalidParameter(
                format!("unknown model {other:?} (expected naive, seasonal, ma)"),
            ))
        }
    };

    forecaster.fit(&series)?;
    let forecast = forecaster.predict(steps)?;

    println!("model: {}", forecaster.name());
    for (h, value) in forecast.point().iter().enumerate() {
        println!("  h={}: {:.2}", h + 1, value);
    }

    Ok(())
}
