//! Serialization of CareChain records.
//!
//! A record on disk is plain text in three sections, separated by blank
//! lines:
//!
//! ```text
//! ---
//! created_datetime:2023-01-01T00:00:00
//! created_by:PLACEHOLDER
//! tags:ENCOUNTER
//! hash:<hex digest>
//! prev_hash:<hex digest, or "0" for the root>
//! ---
//!
//! <free-text body, one logical line per source line>
//!
//! -----BEGIN PGP PUBLIC KEY BLOCK-----
//! <opaque signature lines>
//! -----END PGP PUBLIC KEY BLOCK-----
//! ```
//!
//! [`MetadataBlock`] handles the delimited front matter, [`DocumentRecord`]
//! is the in-memory entity, and [`RecordCodec`] composes the full layout and
//! parses it back with an explicit line-oriented state machine.
//! `decode(encode(x)) == x` for well-formed records is the binding contract
//! of this crate.

pub mod codec;
pub mod error;
pub mod metadata;
pub mod record;

pub use codec::RecordCodec;
pub use error::{CodecResult, FormatError};
pub use metadata::{MetadataBlock, METADATA_DELIMITER};
pub use record::{
    DocumentRecord, KEY_CREATED_BY, KEY_CREATED_DATETIME, KEY_HASH, KEY_PREV_HASH, KEY_TAGS,
};
