//! Complaint data ingestion.
//!
//! Parses raw complaint CSV exports (one row per complaint, with at
//! least a date column), resamples events into monthly counts, and
//! splits series for backtesting.

use crate::core::TimeSeries;
use crate::error::{ComplaintError, Result};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use std::io::Read;
use std::path::Path;

/// Default name of the date column in complaint exports.
pub const DEFAULT_DATE_COLUMN: &str = "date_received";

/// Read complaint event dates from a CSV source.
///
/// The CSV must have a header row containing `date_column`. Dates are
/// accepted as `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`; the returned
/// vector is sorted ascending.
pub fn load_complaint_dates<R: Read>(reader: R, date_column: &str) -> Result<Vec<DateTime<Utc>>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?.clone();
    let col_idx = headers
        .iter()
        .position(|h| h == date_column)
        .ok_or_else(|| ComplaintError::ColumnNotFound(date_column.to_string()))?;

    let mut dates = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let raw = record.get(col_idx).unwrap_or("").trim();
        let parsed = parse_date(raw).ok_or_else(|| ComplaintError::DateParse {
            value: raw.to_string(),
            // +2: header row plus 1-based numbering
            row: row + 2,
        })?;
        dates.push(parsed);
    }

    dates.sort();
    Ok(dates)
}

/// Read complaint event dates from a CSV file path.
pub fn load_complaints_csv<P: AsRef<Path>>(path: P, date_column: &str) -> Result<Vec<DateTime<Utc>>> {
    let file = std::fs::File::open(path)?;
    load_complaint_dates(file, date_column)
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
        return Some(dt);
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Resample raw event dates into a monthly count series.
///
/// Each bucket is timestamped at its month end (midnight UTC on the last
/// day of the month). Months between the first and last event with no
/// rows appear with a count of zero.
pub fn resample_monthly(dates: &[DateTime<Utc>]) -> Result<TimeSeries> {
    if dates.is_empty() {
        return Err(ComplaintError::EmptyData);
    }

    let mut sorted = dates.to_vec();
    sorted.sort();

    let first = sorted[0];
    let last = sorted[sorted.len() - 1];

    let mut timestamps = Vec::new();
    let mut counts = Vec::new();

    let (mut year, mut month) = (first.year(), first.month());
    let (end_year, end_month) = (last.year(), last.month());
    let mut cursor = 0usize;

    loop {
        let bucket_end = month_end(year, month)?;
        let mut count = 0.0;
        while cursor < sorted.len()
            && sorted[cursor].year() == year
            && sorted[cursor].month() == month
        {
            count += 1.0;
            cursor += 1;
        }

        timestamps.push(bucket_end);
        counts.push(count);

        if (year, month) == (end_year, end_month) {
            break;
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    TimeSeries::new(timestamps, counts)
}

/// Midnight UTC on the last day of the given month.
pub fn month_end(year: i32, month: u32) -> Result<DateTime<Utc>> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(|| {
        ComplaintError::TimestampError(format!("invalid year/month: {year}-{month}"))
    })?;
    let last_day = first_of_next.pred_opt().ok_or_else(|| {
        ComplaintError::TimestampError(format!("invalid year/month: {year}-{month}"))
    })?;

    Ok(Utc.from_utc_datetime(&last_day.and_hms_opt(0, 0, 0).unwrap()))
}

/// Leave the last `test_periods` observations for testing.
pub fn train_test_split(series: &TimeSeries, test_periods: usize) -> Result<(TimeSeries, TimeSeries)> {
    if test_periods >= series.len() {
        return Err(ComplaintError::InsufficientData {
            needed: test_periods + 1,
            got: series.len(),
        });
    }

    let split = series.len() - test_periods;
    let train = series.slice(0, split)?;
    let test = series.slice(split, series.len())?;
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Timelike;

    #[test]
    fn loads_dates_from_csv() {
        let csv = "\
complaint_id,date_received,product
1,2020-02-03,card
2,2020-01-15,loan
3,2020-01-20,card
";
        let dates = load_complaint_dates(csv.as_bytes(), DEFAULT_DATE_COLUMN).unwrap();

        assert_eq!(dates.len(), 3);
        // Sorted ascending even though the file is not
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(dates[0].month(), 1);
        assert_eq!(dates[2].month(), 2);
    }

    #[test]
    fn accepts_datetime_values() {
        let csv = "date_received\n2021-07-04T13:45:00\n";
        let dates = load_complaint_dates(csv.as_bytes(), DEFAULT_DATE_COLUMN).unwrap();
        assert_eq!(dates[0].day(), 4);
        assert_eq!(dates[0].hour(), 13);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let csv = "id,created\n1,2020-01-01\n";
        let err = load_complaint_dates(csv.as_bytes(), "date_received").unwrap_err();
        match err {
            ComplaintError::ColumnNotFound(name) => assert_eq!(name, "date_received"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_date_names_the_row() {
        let csv = "date_received\n2020-01-01\nnot-a-date\n";
        let err = load_complaint_dates(csv.as_bytes(), DEFAULT_DATE_COLUMN).unwrap_err();
        match err {
            ComplaintError::DateParse { value, row } => {
                assert_eq!(value, "not-a-date");
                assert_eq!(row, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn resamples_to_month_end_counts() {
        let dates = vec![
            Utc.with_ymd_and_hms(2020, 1, 5, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 1, 28, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 3, 2, 0, 0, 0).unwrap(),
        ];

        let series = resample_monthly(&dates).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.values(), &[2.0, 0.0, 1.0]);
        // Month-end timestamps; 2020 is a leap year
        assert_eq!(series.timestamps()[0].day(), 31);
        assert_eq!(series.timestamps()[1].day(), 29);
        assert_eq!(series.timestamps()[2].day(), 31);
    }

    #[test]
    fn resample_spans_year_boundary() {
        let dates = vec![
            Utc.with_ymd_and_hms(2019, 11, 15, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap(),
        ];

        let series = resample_monthly(&dates).unwrap();

        assert_eq!(series.len(), 4); // Nov, Dec, Jan, Feb
        assert_eq!(series.values(), &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(series.timestamps()[1].month(), 12);
        assert_eq!(series.timestamps()[2].year(), 2020);
    }

    #[test]
    fn resample_empty_is_an_error() {
        assert!(matches!(
            resample_monthly(&[]),
            Err(ComplaintError::EmptyData)
        ));
    }

    #[test]
    fn month_end_handles_december() {
        let end = month_end(2020, 12).unwrap();
        assert_eq!(end.month(), 12);
        assert_eq!(end.day(), 31);
    }

    #[test]
    fn split_holds_out_the_tail() {
        let timestamps: Vec<DateTime<Utc>> = (1..=6)
            .map(|m| Utc.with_ymd_and_hms(2020, m, 28, 0, 0, 0).unwrap())
            .collect();
        let series = TimeSeries::new(timestamps, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();

        let (train, test) = train_test_split(&series, 2).unwrap();

        assert_eq!(train.len(), 4);
        assert_eq!(test.len(), 2);
        assert_relative_eq!(test.values()[0], 5.0, epsilon = 1e-10);
        assert_relative_eq!(test.values()[1], 6.0, epsilon = 1e-10);
    }

    #[test]
    fn split_needs_training_data() {
        let timestamps: Vec<DateTime<Utc>> = (1..=3)
            .map(|m| Utc.with_ymd_and_hms(2020, m, 28, 0, 0, 0).unwrap())
            .collect();
        let series = TimeSeries::new(timestamps, vec![1.0, 2.0, 3.0]).unwrap();

        assert!(matches!(
            train_test_split(&series, 3),
            Err(ComplaintError::InsufficientData { needed: 4, got: 3 })
        ));
    }
}
