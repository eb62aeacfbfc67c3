//! Persistent credential storage.
//!
//! A store is a flat string key/value map. The session keeps exactly two
//! entries in it, [`TOKEN_KEY`] and [`USER_KEY`], which are written and
//! cleared together.

#[cfg(feature = "browser")]
mod browser;
#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(feature = "browser")]
pub use browser::BrowserStore;
#[cfg(not(target_arch = "wasm32"))]
pub use file::{CREDENTIALS_PATH_ENV, FileStore};

use std::{cell::RefCell, collections::HashMap, fmt};

use shared::models::UserRecord;
use tracing::warn;

use crate::error::StoreError;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "admin_token";
/// Key holding the JSON-serialized [`UserRecord`].
pub const USER_KEY: &str = "admin_user";

/// Key/value string storage that survives restarts.
pub trait CredentialStore: fmt::Debug {
    /// Value under `key`; unreadable entries count as missing.
    fn get(&self, key: &str) -> Option<String>;
    /// Writes `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Volatile store used by tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// A bearer token together with the user it was issued to.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    /// Bearer token issued at login.
    pub token: String,
    /// User the token belongs to.
    pub user: UserRecord,
}

impl Credentials {
    /// Pairs a token with its user.
    pub fn new(token: impl Into<String>, user: UserRecord) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Reads both entries. When either is missing, empty, or unparsable, both
    /// are removed and `None` is returned.
    pub fn load(store: &dyn CredentialStore) -> Option<Self> {
        let token = store.get(TOKEN_KEY).filter(|token| !token.is_empty());
        let raw_user = store.get(USER_KEY);

        let parsed = match (token, raw_user) {
            (Some(token), Some(raw_user)) => match serde_json::from_str::<UserRecord>(&raw_user) {
                Ok(user) => Some(Self { token, user }),
                Err(err) => {
                    warn!(error = %err, "discarding unreadable cached user");
                    None
                }
            },
            (None, None) => return None,
            _ => {
                warn!("discarding half-written credentials");
                None
            }
        };

        if parsed.is_none() {
            Self::clear(store);
        }
        parsed
    }

    /// Writes both entries. On failure nothing is left behind.
    pub fn save(&self, store: &dyn CredentialStore) -> Result<(), StoreError> {
        let user = serde_json::to_string(&self.user)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        let written = store
            .set(TOKEN_KEY, &self.token)
            .and_then(|()| store.set(USER_KEY, &user));
        if written.is_err() {
            Self::clear(store);
        }
        written
    }

    /// Removes both entries, logging rather than failing.
    pub fn clear(store: &dyn CredentialStore) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = store.remove(key) {
                warn!(key, error = %err, "failed to remove stored credential");
            }
        }
    }
}
