use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::layout::{chain_order, is_chain_member, StoreState};
use crate::traits::RecordStore;

/// In-memory, map-based record store.
///
/// Intended for tests and embedding. Entries live in a `BTreeMap` behind a
/// `RwLock`; semantics mirror [`DirStore`](crate::DirStore), including the
/// refusal to overwrite an existing entry.
pub struct InMemoryRecordStore {
    entries: RwLock<BTreeMap<String, String>>,
    head: RwLock<Option<String>>,
    state: RwLock<Option<StoreState>>,
}

impl InMemoryRecordStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            head: RwLock::new(None),
            state: RwLock::new(None),
        }
    }

    /// Number of entries currently stored, control files excluded.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn list_entries(&self) -> StoreResult<Vec<String>> {
        let map = self.entries.read().expect("lock poisoned");
        let names = map
            .keys()
            .filter(|name| is_chain_member(name))
            .cloned()
            .collect();
        Ok(chain_order(names))
    }

    fn read_raw(&self, name: &str) -> StoreResult<String> {
        let map = self.entries.read().expect("lock poisoned");
        map.get(name).cloned().ok_or_else(|| StoreError::NotFound {
            name: name.to_string(),
        })
    }

    fn write_new(&self, name: &str, contents: &str) -> StoreResult<()> {
        let mut map = self.entries.write().expect("lock poisoned");
        if map.contains_key(name) {
            return Err(StoreError::AlreadyExists {
                name: name.to_string(),
            });
        }
        map.insert(name.to_string(), contents.to_string());
        Ok(())
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.contains_key(name))
    }

    fn head_ref(&self) -> StoreResult<Option<String>> {
        Ok(self.head.read().expect("lock poisoned").clone())
    }

    fn set_head_ref(&self, name: &str) -> StoreResult<()> {
        *self.head.write().expect("lock poisoned") = Some(name.to_string());
        Ok(())
    }

    fn read_state(&self) -> StoreResult<Option<StoreState>> {
        Ok(self.state.read().expect("lock poisoned").clone())
    }

    fn write_state(&self, state: &StoreState) -> StoreResult<()> {
        *self.state.write().expect("lock poisoned") = Some(state.clone());
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("entry_count", &self.len())
            .finish()
    }
}
