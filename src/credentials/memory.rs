use super::CredentialStore;
use crate::core::MxError;
use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

/// Process-lifetime store held in memory.
#[derive(Default)]
pub struct MemoryStore {
    map: RwLock<HashMap<String, String>>,
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self
            .map
            .read()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("MemoryStore").field("keys", &keys).finish()
    }
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a session token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let mut map = HashMap::new();
        map.insert(
            crate::core::client::CREDENTIAL_KEY.to_string(),
            token.into(),
        );
        Self {
            map: RwLock::new(map),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, MxError> {
        let guard = self
            .map
            .read()
            .map_err(|_| MxError::Store("memory store lock poisoned".into()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MxError> {
        let mut guard = self
            .map
            .write()
            .map_err(|_| MxError::Store("memory store lock poisoned".into()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), MxError> {
        let mut guard = self
            .map
            .write()
            .map_err(|_| MxError::Store("memory store lock poisoned".into()))?;
        guard.remove(key);
        Ok(())
    }
}
