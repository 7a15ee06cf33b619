use std::fmt;

/// The line bounding a metadata block, above and below.
pub const METADATA_DELIMITER: &str = "---";

/// Insertion-ordered key-value front matter of a record.
///
/// Order is semantically significant: it is the serialization order, and the
/// chain hash covers the serialized bytes. Keys are unique; inserting an
/// existing key updates its value in place without moving it.
///
/// There is no character escaping. A value must not itself be a line equal
/// to the delimiter; that is a documented limitation of the format, not
/// something this codec papers over.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MetadataBlock {
    entries: Vec<(String, String)>,
}

impl MetadataBlock {
    /// An empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a key. New keys append; existing keys update in
    /// place, preserving their original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a key's value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Returns `true` if the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the block has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode as a delimited text block:
    /// `---`, one `key:value` line per entry in insertion order, `---`.
    pub fn to_block_string(&self) -> String {
        let mut lines = Vec::with_capacity(self.entries.len() + 2);
        lines.push(METADATA_DELIMITER.to_string());
        for (key, value) in &self.entries {
            lines.push(format!("{key}:{value}"));
        }
        lines.push(METADATA_DELIMITER.to_string());
        lines.join("\n")
    }

    /// Scan arbitrary text for a metadata block.
    ///
    /// The block opens at the first line exactly equal to the delimiter and
    /// closes at the next such line (non-greedy). Every intervening line is
    /// split on its *first* colon, so values may contain colons. Returns
    /// `None` when no balanced delimiter pair exists; a near-miss such as
    /// `--` never matches.
    pub fn from_block_string(text: &str) -> Option<Self> {
        let mut lines = text.lines();
        lines.find(|line| *line == METADATA_DELIMITER)?;

        let mut block = MetadataBlock::new();
        for line in lines {
            if line == METADATA_DELIMITER {
                return Some(block);
            }
            let (key, value) = split_metadata_line(line);
            block.insert(key, value);
        }
        // Opened but never closed.
        None
    }
}

/// Split a metadata line on its first colon. A line with no colon becomes a
/// key with an empty value; encoding never produces such a line.
pub(crate) fn split_metadata_line(line: &str) -> (&str, &str) {
    line.split_once(':').unwrap_or((line, ""))
}

impl fmt::Debug for MetadataBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block() -> MetadataBlock {
        let mut block = MetadataBlock::new();
        block.insert("created_on", "2022-10-01");
        block.insert("created_by", "PLACEHOLDER");
        block.insert("another_key", "20");
        block
    }

    #[test]
    fn encode_sandwiches_entries_between_delimiters() {
        let expected = "---\ncreated_on:2022-10-01\ncreated_by:PLACEHOLDER\nanother_key:20\n---";
        assert_eq!(sample_block().to_block_string(), expected);
    }

    #[test]
    fn encode_preserves_insertion_order() {
        let mut block = MetadataBlock::new();
        block.insert("z", "1");
        block.insert("a", "2");
        block.insert("m", "3");
        let keys: Vec<&str> = block.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn insert_existing_key_updates_in_place() {
        let mut block = sample_block();
        block.insert("created_by", "Dr AC");
        assert_eq!(block.get("created_by"), Some("Dr AC"));
        let keys: Vec<&str> = block.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["created_on", "created_by", "another_key"]);
    }

    #[test]
    fn block_roundtrip() {
        let block = sample_block();
        let parsed = MetadataBlock::from_block_string(&block.to_block_string()).unwrap();
        assert_eq!(parsed, block);
    }

    #[test]
    fn scan_extracts_block_from_surrounding_text() {
        let text = "---\ncreated_on:2023-07-18\ncreated_by:PLACEHOLDER\n---\nHi guys\nThis is an entry";
        let block = MetadataBlock::from_block_string(text).unwrap();
        assert_eq!(block.get("created_on"), Some("2023-07-18"));
        assert_eq!(block.get("created_by"), Some("PLACEHOLDER"));
        assert_eq!(block.len(), 2);
    }

    #[test]
    fn value_keeps_everything_after_first_colon() {
        let text = "---\ncreated_datetime:2023-01-01T00:00:00\n---";
        let block = MetadataBlock::from_block_string(text).unwrap();
        assert_eq!(block.get("created_datetime"), Some("2023-01-01T00:00:00"));
    }

    #[test]
    fn scan_without_any_delimiter_returns_none() {
        assert!(MetadataBlock::from_block_string("just\nsome\ntext").is_none());
    }

    #[test]
    fn unclosed_block_returns_none() {
        let text = "---\ncreated_on:2023-07-18\ncreated_by:PLACEHOLDER\n--";
        assert!(MetadataBlock::from_block_string(text).is_none());
    }

    #[test]
    fn near_miss_open_delimiter_never_matches() {
        let text = "--\ncreated_on:2023-07-18\n---";
        // "--" is not an opening delimiter; "---" alone cannot form a pair.
        assert!(MetadataBlock::from_block_string(text).is_none());
    }

    #[test]
    fn first_qualifying_close_wins() {
        let text = "---\na:1\n---\nb:2\n---";
        let block = MetadataBlock::from_block_string(text).unwrap();
        assert_eq!(block.len(), 1);
        assert_eq!(block.get("a"), Some("1"));
        assert!(!block.contains("b"));
    }

    #[test]
    fn remove_drops_the_entry() {
        let mut block = sample_block();
        assert_eq!(block.remove("created_by"), Some("PLACEHOLDER".to_string()));
        assert!(!block.contains("created_by"));
        assert_eq!(block.remove("created_by"), None);
        assert_eq!(block.len(), 2);
    }
}
