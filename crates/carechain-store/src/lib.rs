//! Directory-backed record storage for the CareChain record chain.
//!
//! A store is a flat directory acting as the ledger: one encoded record per
//! file, where lexicographic filename order tracks chain order. A small set
//! of reserved control filenames (the state file and the head pointer) is
//! excluded from chain traversal; the genesis record, despite its fixed
//! name, is a chain member.
//!
//! # Backends
//!
//! Both implement the [`RecordStore`] trait:
//!
//! - [`DirStore`] — blocking `std::fs` backend used in production. All I/O
//!   is synchronous; a write is a single write-and-close with no locking and
//!   no atomic rename, so exactly one writer is assumed at a time.
//! - [`InMemoryRecordStore`] — map-based store for tests and embedding.
//!
//! The store never interprets record contents; decoding is the codec's job.

pub mod dir;
pub mod error;
pub mod layout;
pub mod memory;
pub mod traits;

pub use dir::DirStore;
pub use error::{StoreError, StoreResult};
pub use layout::{chain_order, is_chain_member, StoreState, GENESIS_FILE, HEAD_FILE, STATE_FILE};
pub use memory::InMemoryRecordStore;
pub use traits::RecordStore;
