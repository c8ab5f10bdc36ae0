use std::path::PathBuf;

use chrono::NaiveDate;

/// Reasons a date range cannot be aggregated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("start and end dates must both be selected")]
    Unset,

    #[error("end date {end} must be after start date {start}")]
    NotIncreasing { start: NaiveDate, end: NaiveDate },

    #[error("could not parse date '{input}' (expected DD/MM/YYYY or YYYY-MM-DD)")]
    UnparseableDate { input: String },
}

/// Errors raised while loading the booking dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{} already exists. Remove it first if you want to reinitialize.", path.display())]
    AlreadyExists { path: PathBuf },
}
