use thiserror::Error;

/// Errors raised by the storage collaborators (vocabulary, history).
/// The session core never produces these.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Invalid vocabulary CSV: {0}")]
    InvalidCsv(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
