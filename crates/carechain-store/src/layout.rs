use serde::{Deserialize, Serialize};

/// Fixed filename of the genesis record. A chain member, not a control file.
pub const GENESIS_FILE: &str = "_ROOT.md";

/// Control file holding the store's JSON state.
pub const STATE_FILE: &str = "state.json";

/// Control file holding the filename of the current chain head.
pub const HEAD_FILE: &str = "HEAD";

/// Reserved control filenames, excluded from any chain traversal.
pub const RESERVED_FILES: [&str; 2] = [STATE_FILE, HEAD_FILE];

/// Returns `true` if a directory entry participates in the chain.
pub fn is_chain_member(name: &str) -> bool {
    !RESERVED_FILES.contains(&name)
}

/// Order chain member filenames into chain order: the genesis record first,
/// then everything else lexicographically (timestamp-keyed filenames sort
/// chronologically).
pub fn chain_order(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    if let Some(idx) = names.iter().position(|n| n == GENESIS_FILE) {
        let genesis = names.remove(idx);
        names.insert(0, genesis);
    }
    names
}

/// Store-level state persisted as `state.json` at initialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreState {
    /// Human-readable name of the store.
    pub name: String,
}

impl StoreState {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
