//! Error types for the paramsweep crate

use thiserror::Error;

/// Result type alias for paramsweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<polars::error::PolarsError> for SweepError {
    fn from(err: polars::error::PolarsError) -> Self {
        SweepError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for SweepError {
    fn from(err: serde_json::Error) -> Self {
        SweepError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SweepError::UnknownParameter("clf__gamma".to_string());
        assert_eq!(err.to_string(), "Unknown parameter: clf__gamma");
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = SweepError::InvalidParameter {
            name: "clf__c".to_string(),
            value: "-1".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid parameter: clf__c = -1, must be positive");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SweepError = io_err.into();
        assert!(matches!(err, SweepError::IoError(_)));
    }
}
