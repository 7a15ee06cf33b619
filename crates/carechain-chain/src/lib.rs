//! Hash-chain linking and verification for the CareChain record chain.
//!
//! [`ChainLinker`] is the only writer of chain pointers: it resolves the
//! current head, hashes the head's exact stored bytes, stamps a new record's
//! `prev_hash`/`hash` metadata, and persists it. Genesis is a distinct
//! one-time operation with an asymmetry that must be preserved exactly: the
//! root hashes its *own* encoded bytes (it has no predecessor), while every
//! other record hashes its predecessor's stored bytes.
//!
//! [`ChainVerifier`] replays that bookkeeping over a whole store and reports
//! the first discrepancy.

pub mod error;
pub mod linker;
pub mod verify;

pub use error::{ChainError, ChainResult};
pub use linker::ChainLinker;
pub use verify::{ChainVerifier, VerifyError, VerifyReport};
