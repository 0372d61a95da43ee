//! `window.localStorage` backend

use web_sys::Storage;

use super::{KeyValueStore, StoreError};

/// Browser LocalStorage for the current origin
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// Open the origin's LocalStorage
    pub fn open() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Remove {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}
