use thiserror::Error;

/// Errors from record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named entry does not exist.
    #[error("entry not found: {name}")]
    NotFound { name: String },

    /// Refused to overwrite an existing entry. Records are immutable once
    /// written; a filename collision is rejected, never resolved silently.
    #[error("entry already exists: {name}")]
    AlreadyExists { name: String },

    /// I/O error from the filesystem, surfaced unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store state file is malformed.
    #[error("malformed store state: {0}")]
    State(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
