use thiserror::Error;

/// Failures while fetching or parsing a records or ordering resource.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {source_name}: {err}")]
    Io {
        source_name: String,
        #[source]
        err: std::io::Error,
    },

    #[error("fetching {source_name}: {err}")]
    Http {
        source_name: String,
        #[source]
        err: reqwest::Error,
    },

    #[error("HTTP error! Status: {status} ({source_name})")]
    Status {
        source_name: String,
        status: reqwest::StatusCode,
    },

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("reading parquet column: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("expected a top-level JSON array of records")]
    NotAnArray,

    #[error("row {0} is not a JSON object")]
    NotAnObject(usize),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}
