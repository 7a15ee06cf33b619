use crate::error::StoreResult;
use crate::layout::StoreState;

/// The ledger directory, seen as a flat set of named text entries.
///
/// All implementations must satisfy these invariants:
/// - Entries are immutable once written; `write_new` rejects an existing
///   name rather than overwriting it.
/// - `list_entries` returns chain members only (reserved control filenames
///   filtered out), in chain order: genesis first, the rest lexicographic.
/// - Raw bytes are returned exactly as stored. Hashing a re-encoded record
///   instead of the stored bytes silently diverges from the chain, so the
///   store must never canonicalize.
/// - I/O errors are propagated, never silently ignored.
pub trait RecordStore: Send + Sync {
    /// List chain member filenames in chain order.
    fn list_entries(&self) -> StoreResult<Vec<String>>;

    /// Read an entry's exact stored text.
    fn read_raw(&self, name: &str) -> StoreResult<String>;

    /// Write a new entry. Fails with `AlreadyExists` if the name is taken.
    fn write_new(&self, name: &str, contents: &str) -> StoreResult<()>;

    /// Check whether an entry exists.
    fn exists(&self, name: &str) -> StoreResult<bool>;

    /// Read the head pointer: the filename of the current chain tail.
    ///
    /// Returns `Ok(None)` when no pointer has been written (an older store,
    /// or one whose control file was removed).
    fn head_ref(&self) -> StoreResult<Option<String>>;

    /// Point the head pointer at the given entry.
    fn set_head_ref(&self, name: &str) -> StoreResult<()>;

    /// Read the store state written at initialization.
    fn read_state(&self) -> StoreResult<Option<StoreState>>;

    /// Write the store state.
    fn write_state(&self, state: &StoreState) -> StoreResult<()>;
}
