use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::layout::{chain_order, is_chain_member, StoreState, HEAD_FILE, STATE_FILE};
use crate::traits::RecordStore;

/// Blocking filesystem store: one encoded record per file in a flat
/// directory.
///
/// All I/O is synchronous and a write is a single write-and-close. There is
/// no locking and no atomic rename commit; exactly one writer at a time is
/// assumed. Two concurrent appenders can both read the same head and write
/// divergent successors, forking the chain — a documented gap of the format,
/// not something this backend detects.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open an existing store directory.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the store directory (and parents) if needed, and open it.
    pub fn create(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "created store directory");
        Ok(Self { root })
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl RecordStore for DirStore {
    fn list_entries(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for dir_entry in fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            if is_chain_member(&name) {
                names.push(name);
            }
        }
        Ok(chain_order(names))
    }

    fn read_raw(&self, name: &str) -> StoreResult<String> {
        match fs::read_to_string(self.entry_path(name)) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StoreError::NotFound {
                name: name.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn write_new(&self, name: &str, contents: &str) -> StoreResult<()> {
        let path = self.entry_path(name);
        if path.exists() {
            return Err(StoreError::AlreadyExists {
                name: name.to_string(),
            });
        }
        fs::write(&path, contents)?;
        debug!(name, bytes = contents.len(), "wrote record entry");
        Ok(())
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.entry_path(name).exists())
    }

    fn head_ref(&self) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.entry_path(HEAD_FILE)) {
            Ok(text) => {
                let name = text.trim().to_string();
                Ok((!name.is_empty()).then_some(name))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_head_ref(&self, name: &str) -> StoreResult<()> {
        fs::write(self.entry_path(HEAD_FILE), format!("{name}\n"))?;
        debug!(name, "moved head pointer");
        Ok(())
    }

    fn read_state(&self) -> StoreResult<Option<StoreState>> {
        match fs::read_to_string(self.entry_path(STATE_FILE)) {
            Ok(text) => {
                let state =
                    serde_json::from_str(&text).map_err(|e| StoreError::State(e.to_string()))?;
                Ok(Some(state))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_state(&self, state: &StoreState) -> StoreResult<()> {
        let json =
            serde_json::to_string_pretty(state).map_err(|e| StoreError::State(e.to_string()))?;
        fs::write(self.entry_path(STATE_FILE), json)?;
        Ok(())
    }
}
