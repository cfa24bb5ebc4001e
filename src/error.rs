//! Recipe-local failure conditions.
//!
//! None of these abort a run: each one is attached to the report of the
//! analysis that produced it and rendered inline next to the other results.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    #[error("Column '{column}' not found in the uploaded file")]
    MissingColumn { column: String },
    #[error("Column '{column}' has invalid value '{value}' on row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
    #[error("Sum of column '{column}' overflows at row {row}")]
    SumOverflow { column: String, row: usize },
    #[error("No rows with a valid rating are available for this analysis")]
    EmptyResult,
}

impl AnalysisError {
    pub fn missing_column(column: &str) -> Self {
        AnalysisError::MissingColumn {
            column: column.to_string(),
        }
    }

    /// Empty results are shown as information rather than as a failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, AnalysisError::EmptyResult)
    }
}
