//! Persistence adapter: storage keys, the versioned JSON envelope, and an
//! in-memory backend.
//!
//! Every persisted entity travels through [`encode`]/[`decode`], which wrap
//! the value in a `{v, data}` envelope so the rest of the engine never sees
//! storage-format drift. Reads never fail outward: a missing key yields a
//! typed default tagged [`LoadSource::Fresh`], a corrupt or
//! wrong-version value yields the same default tagged
//! [`LoadSource::Recovered`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::convert::Infallible;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::KeyValueStorage;
use crate::constants::STORAGE_SCHEMA_VERSION;

pub(crate) const WORD_KEY_PREFIX: &str = "word-record:";
pub(crate) const SESSION_KEY_PREFIX: &str = "session:";
pub(crate) const SCORES_KEY_PREFIX: &str = "scores:";
pub(crate) const PROGRESS_KEY: &str = "progress-summary";
pub(crate) const SETTINGS_KEY: &str = "settings";

#[must_use]
pub(crate) fn word_key(word: &str) -> String {
    format!("{WORD_KEY_PREFIX}{}", word.to_lowercase())
}

#[must_use]
pub(crate) fn session_key(start_ms: i64) -> String {
    format!("{SESSION_KEY_PREFIX}{start_ms}")
}

#[must_use]
pub(crate) fn scores_key(difficulty: &str) -> String {
    format!("{SCORES_KEY_PREFIX}{difficulty}")
}

/// Parse the start timestamp embedded in a session key.
pub(crate) fn session_start_from_key(key: &str) -> Option<i64> {
    key.strip_prefix(SESSION_KEY_PREFIX)?.parse().ok()
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    v: u32,
    data: T,
}

/// Serialize a value inside the versioned envelope.
pub(crate) fn encode<T: Serialize>(value: &T) -> String {
    serde_json::to_string(&Envelope {
        v: STORAGE_SCHEMA_VERSION,
        data: value,
    })
    .unwrap_or_default()
}

/// Decode an enveloped value; `None` for malformed input or a version
/// this build does not understand.
pub(crate) fn decode<T: DeserializeOwned>(raw: &str) -> Option<T> {
    match serde_json::from_str::<Envelope<T>>(raw) {
        Ok(envelope) if envelope.v == STORAGE_SCHEMA_VERSION => Some(envelope.data),
        _ => None,
    }
}

/// Where a loaded value actually came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from a stored value.
    Stored,
    /// No value stored under the key.
    Fresh,
    /// A value was stored but could not be decoded; default substituted.
    Recovered,
}

/// A value read through the adapter, tagged with its origin so callers can
/// distinguish a fresh record from one recovered after corruption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded<T> {
    pub value: T,
    pub source: LoadSource,
}

impl<T> Loaded<T> {
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }
}

/// In-process key-value backend.
///
/// Interior mutability matches the single-writer deployment model: exactly
/// one active game session mutates the store at a time, and every mutation
/// is an unguarded read-modify-write.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_round_trip() {
        let encoded = encode(&vec![1_u32, 2, 3]);
        let decoded: Option<Vec<u32>> = decode(&encoded);
        assert_eq!(decoded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let raw = r#"{"v":99,"data":[1,2,3]}"#;
        let decoded: Option<Vec<u32>> = decode(raw);
        assert_eq!(decoded, None);
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let decoded: Option<Vec<u32>> = decode("{not json");
        assert_eq!(decoded, None);
    }

    #[test]
    fn word_keys_are_lowercased() {
        assert_eq!(word_key("CAT"), "word-record:cat");
        assert_eq!(word_key("cat"), "word-record:cat");
    }

    #[test]
    fn session_key_embeds_start_timestamp() {
        let key = session_key(1_700_000_000_000);
        assert_eq!(session_start_from_key(&key), Some(1_700_000_000_000));
        assert_eq!(session_start_from_key("word-record:cat"), None);
        assert_eq!(session_start_from_key("session:nonsense"), None);
    }

    #[test]
    fn memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());
        storage.set("a", "1").unwrap();
        storage.set("b", "2").unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(storage.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
        storage.remove("a").unwrap();
        assert_eq!(storage.get("a").unwrap(), None);
        assert_eq!(storage.len(), 1);
    }
}
