use gloo_storage::{LocalStorage, Storage};

use super::CredentialStore;
use crate::error::StoreError;

/// Credential store over the browser's `localStorage`.
///
/// Values are stored raw rather than JSON-quoted so they stay readable from
/// the developer tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl BrowserStore {
    /// Store over the window's `localStorage`.
    pub fn new() -> Self {
        Self
    }
}

impl CredentialStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }
}
