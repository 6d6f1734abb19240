//! Worker error types.

/// Errors produced by processing units.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("worker panicked: {0}")]
    Panicked(String),
}

pub type Result<T> = std::result::Result<T, WorkerError>;
