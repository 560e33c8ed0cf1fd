use std::path::PathBuf;

/// Errors raised while assembling the dataset from disk.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A required data file does not exist (check upload and exact, case-sensitive name)
    #[error("data file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// No peak chunk matched any of the expected patterns
    #[error("no chunk files found in {}; expected {expected}; CSV files present: [{present}]", dir.display())]
    NoChunks {
        dir: PathBuf,
        expected: String,
        present: String,
    },

    /// Chunks were found but hold no rows
    #[error("peak data is empty")]
    EmptyPeakData,

    /// Column not found
    #[error("column not found: {0}")]
    MissingColumn(String),

    /// Metadata file extension we cannot read
    #[error("unsupported metadata format: .{0}")]
    UnsupportedFormat(String),

    /// File contents do not have the expected shape
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DataResult<T> = Result<T, DataError>;
