use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the conversation log
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("I/O error on history file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt history file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("Failed to encode history: {0}")]
    Encode(#[from] bincode::Error),
}

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;
