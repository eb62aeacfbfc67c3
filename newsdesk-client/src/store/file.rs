use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use directories::BaseDirs;

use super::CredentialStore;
use crate::error::StoreError;

/// Environment variable overriding the credential file location.
pub const CREDENTIALS_PATH_ENV: &str = "NEWSDESK_CREDENTIALS";

/// Credential store backed by a JSON object on disk, readable only by the owner.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$NEWSDESK_CREDENTIALS`, or `<config dir>/newsdesk/credentials.json`.
    pub fn at_default_location() -> Self {
        Self::new(Self::default_path())
    }

    /// Location chosen by [`Self::path_from`] for the current environment.
    pub fn default_path() -> PathBuf {
        Self::path_from(std::env::var(CREDENTIALS_PATH_ENV).ok())
    }

    /// Resolves the credential file from an override value, falling back to
    /// the user config directory when the override is absent or blank.
    pub fn path_from(override_path: Option<String>) -> PathBuf {
        if let Some(path) = override_path
            && !path.trim().is_empty()
        {
            return PathBuf::from(path);
        }
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("newsdesk").join("credentials.json"))
            .unwrap_or_else(|| PathBuf::from("./newsdesk-credentials.json"))
    }

    /// Location of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|err| {
            StoreError::Io(format!("failed to read {}: {err}", self.path.display()))
        })?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents)
            .map_err(|err| StoreError::Corrupt(format!("{}: {err}", self.path.display())))
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if entries.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|err| {
                    StoreError::Io(format!("failed to remove {}: {err}", self.path.display()))
                })?;
            }
            return Ok(());
        }

        ensure_parent(&self.path)?;
        let serialized = serde_json::to_string_pretty(entries)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        fs::write(&self.path, serialized).map_err(|err| {
            StoreError::Io(format!("failed to write {}: {err}", self.path.display()))
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|err| {
                StoreError::Io(format!("failed to set permissions on {}: {err}", self.path.display()))
            })?;
        }
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_entries() {
            Ok(mut entries) => entries.remove(key),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable credential file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking a fresh login.
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries().unwrap_or_default();
        if entries.remove(key).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}

fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| {
            StoreError::Io(format!("failed to create {}: {err}", parent.display()))
        })?;
    }
    Ok(())
}
