use thiserror::Error;

use carechain_codec::FormatError;
use carechain_store::StoreError;

/// Errors from chain-linking operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Append attempted on a store with no genesis record.
    #[error("store is not initialized: no genesis record present")]
    NotInitialized,

    /// Genesis creation attempted on a store that already has one.
    #[error("store is already initialized")]
    AlreadyInitialized,

    /// The chain head could not be decoded.
    #[error("corrupt chain: head record {name} failed to decode")]
    CorruptHead {
        name: String,
        #[source]
        source: FormatError,
    },

    /// The chain head carries no `hash` metadata to link against.
    #[error("corrupt chain: head record {name} has no hash field")]
    MissingHashField { name: String },

    /// The new record's generated filename is already taken. The creation
    /// instant was not fine-grained enough; the append is rejected rather
    /// than overwriting.
    #[error("filename collision: {name}")]
    FilenameCollision { name: String },

    /// Storage failure, surfaced unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
