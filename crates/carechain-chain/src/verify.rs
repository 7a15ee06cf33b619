use thiserror::Error;
use tracing::debug;

use carechain_codec::{DocumentRecord, FormatError, RecordCodec, KEY_HASH, KEY_PREV_HASH};
use carechain_crypto::ContentHasher;
use carechain_store::{RecordStore, StoreError};
use carechain_types::GENESIS_PREV_HASH;

/// Outcome of a successful chain verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifyReport {
    /// Number of records verified, genesis included.
    pub records: usize,
}

/// Errors from chain verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The store holds no records at all.
    #[error("store is not initialized: no genesis record present")]
    NotInitialized,

    /// A stored record failed to decode.
    #[error("record {name} failed to decode")]
    Decode {
        name: String,
        #[source]
        source: FormatError,
    },

    /// A record lacks one of the reserved chain keys.
    #[error("record {name} has no {key} field")]
    MissingField { name: String, key: &'static str },

    /// The genesis record's back-pointer is not the literal `"0"`.
    #[error("genesis record {name} has prev_hash {found:?}, expected \"0\"")]
    GenesisPrevHash { name: String, found: String },

    /// The genesis record's digest does not cover its own pre-hash bytes.
    #[error("genesis record {name} fails its self-hash check")]
    GenesisHashMismatch { name: String },

    /// A record's `prev_hash` does not match its predecessor's `hash`.
    #[error("broken link at {name}: prev_hash does not match its predecessor")]
    BrokenLink { name: String },

    /// A record's `hash` does not match the digest of its predecessor's
    /// stored bytes.
    #[error("hash mismatch at {name}: stored bytes of the predecessor were altered")]
    HashMismatch { name: String },

    /// Storage failure, surfaced unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Chain integrity verifier.
///
/// Replays the linker's bookkeeping over a whole store, in chain order:
///
/// 1. The genesis record's `prev_hash` is the literal `"0"` and its `hash`
///    covers its own pre-hash encoding.
/// 2. Every subsequent record's `prev_hash` matches its predecessor's
///    `hash` field.
/// 3. Every subsequent record's `hash` matches the digest of its
///    predecessor's exact stored bytes.
pub struct ChainVerifier;

impl ChainVerifier {
    /// Verify every record in the store. Stops at the first discrepancy.
    pub fn verify<S: RecordStore + ?Sized>(store: &S) -> Result<VerifyReport, VerifyError> {
        let names = store.list_entries()?;
        if names.is_empty() {
            return Err(VerifyError::NotInitialized);
        }

        let mut prev: Option<(String, DocumentRecord)> = None;
        for name in &names {
            let raw = store.read_raw(name)?;
            let record = RecordCodec::decode(&raw).map_err(|source| VerifyError::Decode {
                name: name.clone(),
                source,
            })?;
            let hash_field = required_field(name, &record, KEY_HASH)?.to_string();
            let prev_hash_field = required_field(name, &record, KEY_PREV_HASH)?.to_string();

            match &prev {
                None => {
                    if prev_hash_field != GENESIS_PREV_HASH {
                        return Err(VerifyError::GenesisPrevHash {
                            name: name.clone(),
                            found: prev_hash_field,
                        });
                    }
                    if genesis_self_digest(&record).to_hex() != hash_field {
                        return Err(VerifyError::GenesisHashMismatch { name: name.clone() });
                    }
                }
                Some((prev_name, prev_record)) => {
                    if Some(prev_hash_field.as_str()) != prev_record.metadata().get(KEY_HASH) {
                        return Err(VerifyError::BrokenLink { name: name.clone() });
                    }
                    let prev_raw = store.read_raw(prev_name)?;
                    if ContentHasher::digest_str(&prev_raw).to_hex() != hash_field {
                        return Err(VerifyError::HashMismatch { name: name.clone() });
                    }
                }
            }
            debug!(name, "record verified");
            prev = Some((name.clone(), record));
        }

        Ok(VerifyReport {
            records: names.len(),
        })
    }
}

fn required_field<'r>(
    name: &str,
    record: &'r DocumentRecord,
    key: &'static str,
) -> Result<&'r str, VerifyError> {
    record
        .metadata()
        .get(key)
        .ok_or_else(|| VerifyError::MissingField {
            name: name.to_string(),
            key,
        })
}

/// Recompute the digest the genesis record stamped over itself.
///
/// The linker seals the `hash` key last, so removing it restores the
/// pre-hash encoding the digest was computed over.
fn genesis_self_digest(record: &DocumentRecord) -> carechain_types::ContentHash {
    let mut pre_hash = record.clone();
    pre_hash.metadata_mut().remove(KEY_HASH);
    ContentHasher::digest_str(&RecordCodec::encode(&pre_hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linker::ChainLinker;
    use carechain_store::{InMemoryRecordStore, GENESIS_FILE};
    use carechain_types::RecordKind;
    use chrono::{NaiveDate, NaiveDateTime};

    fn instant(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn populated_store(entries: usize) -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        let linker = ChainLinker::new(&store);
        let mut root = DocumentRecord::new(RecordKind::Encounter, "system", instant(0));
        root.add_line("Store initialized");
        linker.genesis(&mut root).unwrap();
        for i in 0..entries {
            let mut record =
                DocumentRecord::new(RecordKind::Encounter, "Dr AC", instant(9 + i as u32));
            record.add_line(format!("entry {i}"));
            linker.append(&mut record).unwrap();
        }
        store
    }

    /// Copy a populated store, applying `f` to one entry's raw text.
    /// Stores refuse overwrites, so tampering happens during the copy.
    fn tampered_store(
        source: &InMemoryRecordStore,
        target: &str,
        mut f: impl FnMut(String) -> String,
    ) -> InMemoryRecordStore {
        let copy = InMemoryRecordStore::new();
        for name in source.list_entries().unwrap() {
            let raw = source.read_raw(&name).unwrap();
            let contents = if name == target { f(raw) } else { raw };
            copy.write_new(&name, &contents).unwrap();
        }
        copy
    }

    #[test]
    fn freshly_written_chain_verifies() {
        let store = populated_store(3);
        let report = ChainVerifier::verify(&store).unwrap();
        assert_eq!(report, VerifyReport { records: 4 });
    }

    #[test]
    fn single_genesis_chain_verifies() {
        let store = populated_store(0);
        assert_eq!(ChainVerifier::verify(&store).unwrap().records, 1);
    }

    #[test]
    fn empty_store_is_not_initialized() {
        let store = InMemoryRecordStore::new();
        assert!(matches!(
            ChainVerifier::verify(&store).unwrap_err(),
            VerifyError::NotInitialized
        ));
    }

    #[test]
    fn tampered_entry_byte_is_detected() {
        let store = populated_store(2);
        // Alter one body byte of the middle entry; its successor's hash no
        // longer covers the stored bytes.
        let copy = tampered_store(&store, "20230101T090000.md", |raw| {
            raw.replace("entry 0", "entry 0 ")
        });
        assert!(matches!(
            ChainVerifier::verify(&copy).unwrap_err(),
            VerifyError::HashMismatch { name } if name == "20230101T100000.md"
        ));
    }

    #[test]
    fn rewritten_prev_hash_is_a_broken_link() {
        let store = populated_store(2);
        let copy = tampered_store(&store, "20230101T100000.md", |raw| {
            let prev = raw
                .lines()
                .find(|l| l.starts_with("prev_hash:"))
                .unwrap()
                .to_string();
            raw.replace(&prev, "prev_hash:0000")
        });
        assert!(matches!(
            ChainVerifier::verify(&copy).unwrap_err(),
            VerifyError::BrokenLink { name } if name == "20230101T100000.md"
        ));
    }

    #[test]
    fn tampered_genesis_fails_its_self_hash() {
        let store = populated_store(0);
        let copy = tampered_store(&store, GENESIS_FILE, |raw| {
            raw.replace("Store initialized", "Store initialised")
        });
        assert!(matches!(
            ChainVerifier::verify(&copy).unwrap_err(),
            VerifyError::GenesisHashMismatch { .. }
        ));
    }

    #[test]
    fn genesis_with_wrong_prev_hash_is_rejected() {
        let store = populated_store(0);
        let copy = tampered_store(&store, GENESIS_FILE, |raw| {
            raw.replace("prev_hash:0\n", "prev_hash:1\n")
        });
        assert!(matches!(
            ChainVerifier::verify(&copy).unwrap_err(),
            VerifyError::GenesisPrevHash { .. }
        ));
    }

    #[test]
    fn record_without_hash_field_is_rejected() {
        let store = InMemoryRecordStore::new();
        let raw = "---\ncreated_by:system\nprev_hash:0\n---\n\nbody\n\n-----BEGIN PGP PUBLIC KEY BLOCK-----\n-----END PGP PUBLIC KEY BLOCK-----\n";
        store.write_new(GENESIS_FILE, raw).unwrap();
        assert!(matches!(
            ChainVerifier::verify(&store).unwrap_err(),
            VerifyError::MissingField { key: "hash", .. }
        ));
    }
}
