use std::fmt;

use chrono::NaiveDateTime;

use carechain_crypto::SignatureBlock;
use carechain_types::{format_instant, ContentHash, RecordId, RecordKind, GENESIS_PREV_HASH};

use crate::metadata::MetadataBlock;

/// Reserved metadata key: this record's own content digest.
pub const KEY_HASH: &str = "hash";
/// Reserved metadata key: the predecessor's digest (`"0"` for the root).
pub const KEY_PREV_HASH: &str = "prev_hash";
/// Metadata key: ISO-8601 creation instant.
pub const KEY_CREATED_DATETIME: &str = "created_datetime";
/// Metadata key: author of the record.
pub const KEY_CREATED_BY: &str = "created_by";
/// Metadata key: record category tag.
pub const KEY_TAGS: &str = "tags";

/// An in-memory clinical record entry.
///
/// A record combines ordered metadata, a free-text body, and an opaque
/// signature block. It is constructed with an empty hash; the chain linker
/// fills `hash`/`prev_hash` exactly once, at write time. Once written, a
/// record is immutable — recomputing its hash afterward breaks the chain.
///
/// Every record owns its metadata exclusively. Defaults are built fresh per
/// instance; two records never share a metadata value.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    id: RecordId,
    metadata: MetadataBlock,
    body: Vec<String>,
    signature: SignatureBlock,
    hash: Option<ContentHash>,
}

impl DocumentRecord {
    /// Create a record with freshly constructed default metadata for the
    /// given kind, author, and creation instant.
    pub fn new(kind: RecordKind, author: &str, created: NaiveDateTime) -> Self {
        let mut metadata = MetadataBlock::new();
        metadata.insert(KEY_CREATED_DATETIME, format_instant(&created));
        metadata.insert(KEY_CREATED_BY, author);
        metadata.insert(KEY_TAGS, kind.name());
        Self {
            id: RecordId::from_instant(&created),
            metadata,
            body: Vec::new(),
            signature: SignatureBlock::placeholder(),
            hash: None,
        }
    }

    /// Reassemble a record from decoded parts.
    ///
    /// The filename key is rederived from `created_datetime` metadata, and
    /// the in-memory hash from the `hash` metadata value where it parses as
    /// a digest (the genesis literal `"0"` does not).
    pub fn from_parts(
        metadata: MetadataBlock,
        body: Vec<String>,
        signature: SignatureBlock,
    ) -> Self {
        let id = metadata
            .get(KEY_CREATED_DATETIME)
            .map(RecordId::from_iso)
            .unwrap_or_else(|| RecordId::from_iso(""));
        let hash = metadata
            .get(KEY_HASH)
            .and_then(|hex| ContentHash::from_hex(hex).ok());
        Self {
            id,
            metadata,
            body,
            signature,
            hash,
        }
    }

    /// Append one line of body text.
    pub fn add_line(&mut self, line: impl Into<String>) {
        self.body.push(line.into());
    }

    /// Append several lines of body text.
    pub fn add_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            self.add_line(line);
        }
    }

    /// The filename key derived from the creation instant.
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// The on-disk filename for this record.
    pub fn filename(&self) -> String {
        self.id.filename()
    }

    /// The record's metadata, in insertion order.
    pub fn metadata(&self) -> &MetadataBlock {
        &self.metadata
    }

    /// Mutable access to the metadata, for callers adding their own keys
    /// before the record is linked and written.
    pub fn metadata_mut(&mut self) -> &mut MetadataBlock {
        &mut self.metadata
    }

    /// Body lines, without separators.
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// The body as one newline-joined string.
    pub fn body_text(&self) -> String {
        self.body.join("\n")
    }

    /// The trailing signature block.
    pub fn signature(&self) -> &SignatureBlock {
        &self.signature
    }

    /// This record's own content digest, once stamped or decoded.
    pub fn hash(&self) -> Option<&ContentHash> {
        self.hash.as_ref()
    }

    /// The `prev_hash` metadata value, if stamped.
    pub fn prev_hash(&self) -> Option<&str> {
        self.metadata.get(KEY_PREV_HASH)
    }

    /// Returns `true` if this record carries the genesis back-pointer.
    pub fn is_genesis(&self) -> bool {
        self.prev_hash() == Some(GENESIS_PREV_HASH)
    }

    /// Stamp the predecessor pointer. Called by the chain linker exactly
    /// once, at write time.
    pub fn set_prev_hash(&mut self, prev: &str) {
        self.metadata.insert(KEY_PREV_HASH, prev);
    }

    /// Stamp this record's own digest. Called by the chain linker exactly
    /// once, at write time, after `set_prev_hash` — the `hash` key is always
    /// the last metadata entry, which is what lets the genesis pre-hash
    /// encoding be reconstructed by removing it.
    pub fn seal(&mut self, hash: ContentHash) {
        self.metadata.insert(KEY_HASH, hash.to_hex());
        self.hash = Some(hash);
    }
}

impl fmt::Debug for DocumentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentRecord")
            .field("id", &self.id)
            .field("metadata", &self.metadata)
            .field("body_lines", &self.body.len())
            .field("hash", &self.hash)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carechain_crypto::ContentHasher;
    use chrono::NaiveDate;

    fn created() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn new_record_has_default_metadata() {
        let record = DocumentRecord::new(RecordKind::Encounter, "PLACEHOLDER", created());
        let keys: Vec<&str> = record.metadata().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, [KEY_CREATED_DATETIME, KEY_CREATED_BY, KEY_TAGS]);
        assert_eq!(
            record.metadata().get(KEY_CREATED_DATETIME),
            Some("2023-01-01T00:00:00")
        );
        assert_eq!(record.metadata().get(KEY_CREATED_BY), Some("PLACEHOLDER"));
        assert_eq!(record.metadata().get(KEY_TAGS), Some("ENCOUNTER"));
    }

    #[test]
    fn new_record_has_empty_hash_and_body() {
        let record = DocumentRecord::new(RecordKind::Encounter, "PLACEHOLDER", created());
        assert!(record.hash().is_none());
        assert!(record.body().is_empty());
        assert!(record.prev_hash().is_none());
    }

    #[test]
    fn filename_key_matches_creation_instant() {
        let record = DocumentRecord::new(RecordKind::Encounter, "PLACEHOLDER", created());
        assert_eq!(record.id().as_str(), "20230101T000000");
        assert_eq!(record.filename(), "20230101T000000.md");
    }

    #[test]
    fn records_never_share_metadata() {
        let mut a = DocumentRecord::new(RecordKind::Encounter, "PLACEHOLDER", created());
        let b = DocumentRecord::new(RecordKind::Encounter, "PLACEHOLDER", created());
        a.metadata_mut().insert("nhs_number", "327189122");
        assert!(!b.metadata().contains("nhs_number"));
    }

    #[test]
    fn add_line_appends_to_body() {
        let mut record = DocumentRecord::new(RecordKind::Encounter, "PLACEHOLDER", created());
        record.add_line("NEW LINE");
        assert_eq!(record.body(), ["NEW LINE"]);
        assert_eq!(record.body_text(), "NEW LINE");
    }

    #[test]
    fn add_lines_preserves_order() {
        let mut record = DocumentRecord::new(RecordKind::Encounter, "PLACEHOLDER", created());
        record.add_lines(["Line1", "Line2", "Line3"]);
        assert_eq!(record.body_text(), "Line1\nLine2\nLine3");
    }

    #[test]
    fn seal_sets_hash_field_and_metadata() {
        let mut record = DocumentRecord::new(RecordKind::Encounter, "PLACEHOLDER", created());
        let digest = ContentHasher::digest_str("some stored bytes");
        record.set_prev_hash(GENESIS_PREV_HASH);
        record.seal(digest);
        assert_eq!(record.hash(), Some(&digest));
        assert_eq!(record.metadata().get(KEY_HASH), Some(digest.to_hex().as_str()));
        assert!(record.is_genesis());
        // hash is stamped last.
        let last_key = record.metadata().iter().last().map(|(k, _)| k);
        assert_eq!(last_key, Some(KEY_HASH));
    }

    #[test]
    fn from_parts_rederives_id_and_hash() {
        let digest = ContentHasher::digest_str("x");
        let mut metadata = MetadataBlock::new();
        metadata.insert(KEY_CREATED_DATETIME, "2023-01-01T00:00:00");
        metadata.insert(KEY_HASH, digest.to_hex());
        let record = DocumentRecord::from_parts(
            metadata,
            vec!["body".to_string()],
            SignatureBlock::placeholder(),
        );
        assert_eq!(record.id().as_str(), "20230101T000000");
        assert_eq!(record.hash(), Some(&digest));
    }

    #[test]
    fn from_parts_with_non_digest_hash_leaves_hash_empty() {
        let mut metadata = MetadataBlock::new();
        metadata.insert(KEY_CREATED_DATETIME, "2023-01-01T00:00:00");
        metadata.insert(KEY_HASH, "TESTHASH");
        let record =
            DocumentRecord::from_parts(metadata, Vec::new(), SignatureBlock::placeholder());
        assert!(record.hash().is_none());
        // but the metadata text is preserved verbatim for round-tripping.
        assert_eq!(record.metadata().get(KEY_HASH), Some("TESTHASH"));
    }
}
