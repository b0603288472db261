//! Error types for the loadcast pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while building or emitting forecasts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// No training timestamps to derive a horizon from.
    #[error("empty history: no training timestamps to derive a horizon from")]
    EmptyHistory,

    /// The seasonal-hour price window has no observation for an hour-of-day.
    #[error("incomplete price window: no observation for hour {hour} in the fallback window")]
    IncompletePriceWindow { hour: u32 },

    /// Submission template is structurally unusable.
    #[error("malformed template: {0}")]
    MalformedTemplate(String),

    /// A group's model artifact could not be loaded.
    #[error("failed to load model for group {group}: {reason}")]
    ModelLoad { group: String, reason: String },

    /// A group's model failed to produce a usable prediction.
    #[error("prediction failed for group {group}: {reason}")]
    Prediction { group: String, reason: String },

    /// Missing values survived where a fully populated column is required.
    #[error("missing values in '{0}'")]
    MissingValues(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Numeric or timestamp field could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Configuration could not be read or is inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// Underlying filesystem error.
    #[error("io error: {0}")]
    Io(String),

    /// CSV reader/writer error.
    #[error("csv error: {0}")]
    Csv(String),
}

impl From<std::io::Error> for ForecastError {
    fn from(err: std::io::Error) -> Self {
        ForecastError::Io(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::Csv(err.to_string())
    }
}

impl From<toml::de::Error> for ForecastError {
    fn from(err: toml::de::Error) -> Self {
        ForecastError::Config(err.to_string())
    }
}

impl From<chrono::ParseError> for ForecastError {
    fn from(err: chrono::ParseError) -> Self {
        ForecastError::Parse(err.to_string())
    }
}
