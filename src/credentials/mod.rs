//! Session credential storage and resolution.
//!
//! The store is injected into [`crate::MxClient`]; nothing here is global. Data calls only ever
//! read from it, [`crate::Session`] writes to it on login and logout.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::core::MxError;
use crate::core::client::CREDENTIAL_KEY;
use std::fmt;

/// An opaque session token issued by the `login` endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building requests.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Key/value persistence for session state.
///
/// Implementations must be safe to share across concurrent cell evaluations.
pub trait CredentialStore: Send + Sync + fmt::Debug {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::Store`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, MxError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::Store`] if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), MxError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::Store`] if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), MxError>;
}

/// Returns the current session credential, or `None`.
///
/// Never fails: an unreadable store, a missing entry and an empty token all resolve to `None`.
pub fn resolve(store: &dyn CredentialStore) -> Option<Credential> {
    match store.get(CREDENTIAL_KEY) {
        Ok(Some(token)) if !token.is_empty() => Some(Credential(token)),
        Ok(_) => None,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %_e, "credential store unreadable; treating as logged out");
            None
        }
    }
}
