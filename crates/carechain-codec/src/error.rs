use thiserror::Error;

/// Errors from decoding a stored record.
///
/// All decode failures are fatal to the invoking operation; no partial
/// recovery is attempted. A partially written file surfaces here rather
/// than as a truncated record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The file does not start with the metadata delimiter line.
    #[error("record does not start with the metadata delimiter")]
    MissingOpeningDelimiter,

    /// A metadata section was opened but never closed.
    #[error("metadata delimiter is never closed")]
    UnterminatedMetadata,

    /// No signature begin-marker line was found after the body.
    #[error("no signature block marker found")]
    MissingSignature,
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, FormatError>;
