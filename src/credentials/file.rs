//! JSON file store under the user config directory.
//!
//! Layout: a flat `{"key": "value"}` object. Written with `0600` on Unix.

use super::CredentialStore;
use crate::core::MxError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Persists session state to a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// A store backed by the file at `path`. The file is created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// `~/.config/mxfinance/credentials.json` (or the platform equivalent).
    ///
    /// Returns `None` if the platform has no config directory.
    #[must_use]
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|c| Self::new(c.join("mxfinance").join("credentials.json")))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, MxError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(MxError::Store(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents)
            .map_err(|e| MxError::Store(format!("corrupt {}: {e}", self.path.display())))
    }

    fn save(&self, map: &BTreeMap<String, String>) -> Result<(), MxError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| MxError::Store(format!("failed to create config directory: {e}")))?;
        }

        let contents = serde_json::to_string_pretty(map)
            .map_err(|e| MxError::Store(format!("failed to serialize credentials: {e}")))?;
        std::fs::write(&self.path, contents)
            .map_err(|e| MxError::Store(format!("failed to write {}: {e}", self.path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, permissions)
                .map_err(|e| MxError::Store(format!("failed to set file permissions: {e}")))?;
        }

        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), MxError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| MxError::Store("file store lock poisoned".into()))?;
        let mut map = self.load()?;
        f(&mut map);
        self.save(&map)
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, MxError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MxError> {
        self.update(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), MxError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|map| {
            map.remove(key);
        })
    }
}
