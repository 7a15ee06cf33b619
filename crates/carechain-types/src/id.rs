use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::temporal::format_instant;

/// File extension shared by all chain records.
pub const RECORD_FILE_EXT: &str = ".md";

/// Sortable filename key derived from a record's creation instant.
///
/// The key is the ISO-8601 creation instant with `:`, `.`, and `-` stripped,
/// so lexicographic filename order tracks chain order. Sub-second digits are
/// included when present, which is what keeps rapidly successive keys from
/// colliding: `2023-01-01T00:00:00` → `20230101T000000`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Derive the key for a creation instant.
    pub fn from_instant(instant: &NaiveDateTime) -> Self {
        Self::from_iso(&format_instant(instant))
    }

    /// Derive the key from an ISO-8601 instant string, stripping the
    /// filename-hostile symbols.
    pub fn from_iso(iso: &str) -> Self {
        let key = iso
            .chars()
            .filter(|c| !matches!(c, ':' | '.' | '-'))
            .collect();
        Self(key)
    }

    /// The bare key, without extension.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The full on-disk filename for this key.
    pub fn filename(&self) -> String {
        format!("{}{}", self.0, RECORD_FILE_EXT)
    }

    /// Returns `true` if no instant was available to derive a key from.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn midnight_instant_derives_expected_key() {
        let dt = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(RecordId::from_instant(&dt).as_str(), "20230101T000000");
    }

    #[test]
    fn subsecond_instant_extends_the_key() {
        let dt = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_micro_opt(0, 0, 0, 42)
            .unwrap();
        assert_eq!(RecordId::from_instant(&dt).as_str(), "20230101T000000000042");
    }

    #[test]
    fn filename_appends_extension() {
        let id = RecordId::from_iso("2023-01-01T00:00:00");
        assert_eq!(id.filename(), "20230101T000000.md");
    }

    #[test]
    fn later_instants_sort_later() {
        let d = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        let earlier = RecordId::from_instant(&d.and_hms_opt(10, 0, 0).unwrap());
        let later = RecordId::from_instant(&d.and_hms_opt(10, 0, 1).unwrap());
        assert!(earlier < later);
        assert!(earlier.filename() < later.filename());
    }
}
