//! Error types for the complaints-forecast library.

use thiserror::Error;

/// Result type alias for forecast and alerting operations.
pub type Result<T> = std::result::Result<T, ComplaintError>;

/// Errors that can occur during ingestion, detection, or forecasting.
#[derive(Error, Debug)]
pub enum ComplaintError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value (configuration rejected before computation).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Cost model identifier is not one of the supported variants.
    #[error("unsupported cost model: {0:?} (expected one of \"l1\", \"l2\", \"rbf\")")]
    UnsupportedCostModel(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Required column missing from the input file.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// A date field could not be parsed.
    #[error("could not parse date {value:?} in row {row}")]
    DateParse { value: String, row: usize },

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ComplaintError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = ComplaintError::InsufficientData { needed: 10, got: 5 };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 10, got 5"
        );

        let err = ComplaintError::InvalidParameter("window must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid parameter: window must be positive"
        );

        let err = ComplaintError::UnsupportedCostModel("l3".to_string());
        assert!(err.to_string().contains("l3"));
        assert!(err.to_string().contains("rbf"));

        let err = ComplaintError::FitRequired;
        assert_eq!(err.to_string(), "model must be fitted before prediction");
    }

    #[test]
    fn date_parse_error_names_row_and_value() {
        let err = ComplaintError::DateParse {
            value: "not-a-date".to_string(),
            row: 3,
        };
        assert_eq!(
            err.to_string(),
            "could not parse date \"not-a-date\" in row 3"
        );
    }
}
