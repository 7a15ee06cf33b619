use tracing::{debug, info};

use carechain_codec::{DocumentRecord, RecordCodec, KEY_HASH};
use carechain_crypto::ContentHasher;
use carechain_store::{RecordStore, GENESIS_FILE};
use carechain_types::{ContentHash, GENESIS_PREV_HASH};

use crate::error::{ChainError, ChainResult};

/// Links new records onto the chain and persists them.
///
/// The linker is the only code that stamps `prev_hash`/`hash` metadata, and
/// it does so exactly once per record, at write time. Records already in the
/// store are never rewritten; recomputing a persisted record's hash would
/// silently desynchronize the chain.
pub struct ChainLinker<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> ChainLinker<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create the one-time genesis record.
    ///
    /// The root has no predecessor to hash, so it hashes itself: its digest
    /// is computed over its own encoded bytes *before* the `hash` key is
    /// stamped, and its back-pointer is the literal `"0"`. It is written
    /// under the fixed root filename.
    pub fn genesis(&self, record: &mut DocumentRecord) -> ChainResult<ContentHash> {
        if self.store.exists(GENESIS_FILE)? {
            return Err(ChainError::AlreadyInitialized);
        }

        record.set_prev_hash(GENESIS_PREV_HASH);
        let pre_hash_encoding = RecordCodec::encode(record);
        let hash = ContentHasher::digest_str(&pre_hash_encoding);
        record.seal(hash);

        self.store.write_new(GENESIS_FILE, &RecordCodec::encode(record))?;
        self.store.set_head_ref(GENESIS_FILE)?;
        info!(hash = %hash.short_hex(), "wrote genesis record");
        Ok(hash)
    }

    /// Link a new record to the current head and persist it.
    ///
    /// The head's digest is computed over its exact stored bytes — never a
    /// re-encoded canonical form. The new record takes the head's `hash`
    /// metadata as its `prev_hash` and that digest as its own `hash`, then
    /// is written under its generated filename. A filename collision is
    /// rejected, never overwritten.
    pub fn append(&self, record: &mut DocumentRecord) -> ChainResult<ContentHash> {
        let (head_name, head_raw) = self.head_entry()?;
        debug!(head = %head_name, "linking against chain head");

        let head = RecordCodec::decode(&head_raw).map_err(|source| ChainError::CorruptHead {
            name: head_name.clone(),
            source,
        })?;
        let prev_hash = head
            .metadata()
            .get(KEY_HASH)
            .ok_or(ChainError::MissingHashField { name: head_name })?
            .to_string();
        let hash = ContentHasher::digest_str(&head_raw);

        record.set_prev_hash(&prev_hash);
        record.seal(hash);

        let filename = record.filename();
        if self.store.exists(&filename)? {
            return Err(ChainError::FilenameCollision { name: filename });
        }
        self.store.write_new(&filename, &RecordCodec::encode(record))?;
        self.store.set_head_ref(&filename)?;
        info!(name = %filename, hash = %hash.short_hex(), "appended record");
        Ok(hash)
    }

    /// Resolve the current head and read its exact stored bytes.
    ///
    /// The head pointer control file is authoritative. When it is absent
    /// (an older store, or a deleted control file), the head is re-inferred
    /// as the lexicographically last chain entry.
    fn head_entry(&self) -> ChainResult<(String, String)> {
        if let Some(name) = self.store.head_ref()? {
            if self.store.exists(&name)? {
                let raw = self.store.read_raw(&name)?;
                return Ok((name, raw));
            }
            debug!(name, "head pointer is dangling, falling back to scan");
        }

        let entries = self.store.list_entries()?;
        match entries.last() {
            None => Err(ChainError::NotInitialized),
            Some(name) => {
                let raw = self.store.read_raw(name)?;
                Ok((name.clone(), raw))
            }
        }
    }
}
