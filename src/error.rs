//! Error types for table ingestion and the aggregation pipeline.

use thiserror::Error;

/// The input table does not have the shape the pipeline needs.
///
/// Raised before any aggregation happens, so a failed invocation never
/// yields partial summary rows.
#[derive(Error, Debug)]
pub enum DataFormatError {
    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("column '{column}' row {row}: '{value}' is not numeric")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}
