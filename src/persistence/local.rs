//! Browser LocalStorage backend

use web_sys::Storage;

use super::{StorageBackend, StorageError};

pub struct LocalStorageBackend {
    storage: Option<Storage>,
}

impl LocalStorageBackend {
    /// Bind to `window.localStorage`; a missing store makes every call fail
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, progress will not persist");
        }
        Self { storage }
    }
}

impl Default for LocalStorageBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for LocalStorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}
