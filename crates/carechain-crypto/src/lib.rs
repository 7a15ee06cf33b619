//! Cryptographic primitives for the CareChain record chain.
//!
//! Two concerns live here:
//!
//! - [`ContentHasher`] — the fixed, versionable digest algorithm (SHA-256)
//!   that links each record to its predecessor's stored bytes.
//! - [`SignatureBlock`] — the opaque PGP-armored trailing section of a
//!   record. Only its boundary markers are interpreted; the block's
//!   cryptographic content is never validated here.

pub mod hasher;
pub mod pgp;

pub use hasher::ContentHasher;
pub use pgp::{SignatureBlock, SIGNATURE_BEGIN_MARKER, SIGNATURE_END_MARKER};
