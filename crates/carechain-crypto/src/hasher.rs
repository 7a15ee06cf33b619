use sha2::{Digest, Sha256};

use carechain_types::ContentHash;

/// SHA-256 content hasher for chain integrity links.
///
/// Unkeyed, unsalted, purely deterministic: identical bytes always produce
/// identical digests, and any byte difference produces a different one. The
/// algorithm is fixed here so a future migration has exactly one place to
/// change.
pub struct ContentHasher;

impl ContentHasher {
    /// Hash raw bytes.
    pub fn digest(data: &[u8]) -> ContentHash {
        let digest: [u8; 32] = Sha256::digest(data).into();
        ContentHash::from_digest(digest)
    }

    /// Hash the UTF-8 bytes of a string.
    pub fn digest_str(data: &str) -> ContentHash {
        Self::digest(data.as_bytes())
    }
}
