use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a file on disk into a [`Dataset`](crate::data::model::Dataset).
///
/// Only the loader produces errors. Filtering and aggregation are total:
/// an empty selection or an undefined correlation is a valid result, not a failure.
#[derive(Debug, Error)]
pub enum DataError {
    /// The data file does not exist. Fatal at start-up.
    #[error("data file not found: {}. Please ensure it exists.", path.display())]
    MissingDataSource { path: PathBuf },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    /// `row` is the 1-based data row (header excluded).
    #[error("row {row}, column '{column}': invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

pub type Result<T> = std::result::Result<T, DataError>;
