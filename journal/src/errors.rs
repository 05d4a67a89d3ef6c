use thiserror::Error;

/// Journal storage errors
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Storage Error: {0}")]
    StorageError(String),

    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Result type for journal operations
pub type JournalResult<T> = Result<T, JournalError>;
