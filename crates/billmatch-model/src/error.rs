//! Error types for matching operations.

use thiserror::Error;

/// Errors raised while converting tables or matching a batch.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A required column is absent from an input table.
    #[error("required column '{column}' not found")]
    MissingColumn { column: String },

    /// A required column exists but does not hold text.
    #[error("column '{column}' must be a string column, found {dtype}")]
    TypeMismatch { column: String, dtype: String },

    /// No candidates were left for a query record.
    ///
    /// Only raised when the empty-candidate policy is set to fail.
    #[error("no candidate records for incoming row {row}")]
    EmptyCandidateSet { row: usize },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    Frame { message: String },
}

impl From<polars::prelude::PolarsError> for MatchError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Frame {
            message: err.to_string(),
        }
    }
}

/// Result type for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MatchError::MissingColumn {
            column: "Name_Address".to_string(),
        };
        assert_eq!(err.to_string(), "required column 'Name_Address' not found");

        let err = MatchError::EmptyCandidateSet { row: 4 };
        assert_eq!(err.to_string(), "no candidate records for incoming row 4");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("Zip".into());
        let match_err: MatchError = polars_err.into();
        assert!(matches!(match_err, MatchError::Frame { .. }));
    }
}
