//! Key-value persistence backends
//!
//! Progress lives in a browser-scoped string store. Everything above this
//! module sees it only through [`KeyValueStore`]:
//! - `LocalStore`: `window.localStorage` (wasm only)
//! - [`MemoryStore`]: in-process map, used natively and in tests

#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

use std::collections::HashMap;

/// Failure of the underlying storage
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage is not available")]
    Unavailable,

    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },

    #[error("failed to remove `{key}`: {reason}")]
    Remove { key: String, reason: String },

    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Opaque string key-value store
pub trait KeyValueStore {
    /// Read a value, `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    /// Reject all writes, simulating disabled storage or an exceeded quota
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that refuses every write
    pub fn read_only() -> Self {
        Self {
            entries: HashMap::new(),
            read_only: true,
        }
    }

    /// Seed a raw value, bypassing the read-only flag
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Write {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Remove {
                key: key.to_string(),
                reason: "storage is read-only".to_string(),
            });
        }
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "[1,2]").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("[1,2]"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let mut store = MemoryStore::read_only().with_entry("k", "v");
        let err = store.set("k", "w").unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert!(store.remove("k").is_err());
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn write_through<S: KeyValueStore>(mut store: S) {
            store.set("a", "1").unwrap();
        }

        let mut store = MemoryStore::new();
        write_through(&mut store);
        assert_eq!(store.len(), 1);
    }
}
