use thiserror::Error;

/// farmstand error types
#[derive(Error, Debug)]
pub enum FarmstandError {
    /// Failed to parse JSON/JSONL
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot directory missing or unreadable
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// Row failed validation (bad price, coordinates, rating, ...)
    #[error("invalid row: {0}")]
    InvalidRow(String),
}

/// Result type alias for farmstand
pub type Result<T> = std::result::Result<T, FarmstandError>;
