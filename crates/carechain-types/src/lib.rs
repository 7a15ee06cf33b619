//! Foundation types for the CareChain record chain.
//!
//! This crate provides the core identity and temporal types used throughout
//! the CareChain system. Every other CareChain crate depends on
//! `carechain-types`.
//!
//! # Key Types
//!
//! - [`ContentHash`] — SHA-256 content digest used for chain integrity links
//! - [`RecordKind`] — Closed set of clinical record categories
//! - [`RecordId`] — Sortable filename key derived from a creation instant
//! - [`Clock`] — Source of creation instants, with a fixed test double

pub mod error;
pub mod hash;
pub mod id;
pub mod kind;
pub mod temporal;

pub use error::TypeError;
pub use hash::{ContentHash, GENESIS_PREV_HASH};
pub use id::{RecordId, RECORD_FILE_EXT};
pub use kind::RecordKind;
pub use temporal::{format_instant, Clock, FixedClock, SystemClock};
