use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Unavailable,
    Corrupt(String),
    Io(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "persistent storage unavailable"),
            StorageError::Corrupt(msg) => write!(f, "stored payload corrupt: {msg}"),
            StorageError::Io(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Persistent string key-value substrate.
///
/// Implementations are single-writer; callers own mutation ordering.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<bool, StorageError>;
}

/// Reads and decodes a JSON value stored under `key`.
///
/// Absent keys and blank payloads read as `None`; a payload that fails to
/// decode is reported as `Corrupt`.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<T>(&raw)
        .map(Some)
        .map_err(|e| StorageError::Corrupt(e.to_string()))
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn set_json<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Io(e.to_string()))?;
    store.set(key, &raw)
}

#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: BTreeMap<String, String>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.remove(key).is_some())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{KeyValueStore, StorageError};

    /// Browser `localStorage` substrate. Keys are namespaced by a prefix so
    /// unrelated entries under the same origin are left alone.
    #[derive(Debug)]
    pub struct LocalStorageKeyValueStore {
        key_prefix: String,
    }

    impl LocalStorageKeyValueStore {
        pub fn new(key_prefix: impl Into<String>) -> Result<Self, StorageError> {
            // Probe availability up front so construction fails loudly rather
            // than every later call.
            let _ = window_local_storage()?;
            Ok(Self {
                key_prefix: key_prefix.into(),
            })
        }

        fn storage_key(&self, key: &str) -> String {
            if self.key_prefix.is_empty() {
                key.to_string()
            } else {
                format!("{}.{}", self.key_prefix, key)
            }
        }
    }

    impl KeyValueStore for LocalStorageKeyValueStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            let storage = window_local_storage()?;
            storage
                .get_item(&self.storage_key(key))
                .map_err(|e| StorageError::Io(format!("get_item failed: {:?}", e)))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            let storage = window_local_storage()?;
            storage
                .set_item(&self.storage_key(key), value)
                .map_err(|e| StorageError::Io(format!("set_item failed: {:?}", e)))
        }

        fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
            let storage = window_local_storage()?;
            let full_key = self.storage_key(key);
            let existed = storage
                .get_item(&full_key)
                .map_err(|e| StorageError::Io(format!("get_item failed: {:?}", e)))?
                .is_some();
            if existed {
                storage
                    .remove_item(&full_key)
                    .map_err(|e| StorageError::Io(format!("remove_item failed: {:?}", e)))?;
            }
            Ok(existed)
        }
    }

    fn window_local_storage() -> Result<web_sys::Storage, StorageError> {
        let win = web_sys::window().ok_or(StorageError::Unavailable)?;
        win.local_storage()
            .map_err(|e| StorageError::Io(format!("localStorage error: {:?}", e)))?
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::LocalStorageKeyValueStore;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LocalStorageKeyValueStore;

#[cfg(not(target_arch = "wasm32"))]
impl LocalStorageKeyValueStore {
    pub fn new(_key_prefix: impl Into<String>) -> Result<Self, StorageError> {
        Err(StorageError::Unavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for LocalStorageKeyValueStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&mut self, _key: &str) -> Result<bool, StorageError> {
        Err(StorageError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryKeyValueStore, KeyValueStore, StorageError, get_json, set_json};
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        name: String,
        count: u32,
    }

    #[test]
    fn set_get_remove_round_trip() {
        let mut store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));

        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn json_helpers_round_trip() {
        let mut store = InMemoryKeyValueStore::new();
        let payload = Payload {
            name: "tiles".to_string(),
            count: 3,
        };
        set_json(&mut store, "payload", &payload).unwrap();

        let loaded: Option<Payload> = get_json(&store, "payload").unwrap();
        assert_eq!(loaded, Some(payload));
    }

    #[test]
    fn absent_and_blank_read_as_none() {
        let mut store = InMemoryKeyValueStore::new();
        let missing: Option<Payload> = get_json(&store, "missing").unwrap();
        assert_eq!(missing, None);

        store.set("blank", "   ").unwrap();
        let blank: Option<Payload> = get_json(&store, "blank").unwrap();
        assert_eq!(blank, None);
    }

    #[test]
    fn garbage_payload_reports_corrupt() {
        let mut store = InMemoryKeyValueStore::new();
        store.set("bad", "{not json").unwrap();
        let err = get_json::<Payload>(&store, "bad").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn local_storage_is_unavailable_off_wasm() {
        let err = super::LocalStorageKeyValueStore::new("prefix").unwrap_err();
        assert_eq!(err, StorageError::Unavailable);
    }
}
