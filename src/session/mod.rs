//! Session store: the single bearer credential
//!
//! The token lives in memory for fast synchronous reads and is mirrored to a
//! [`TokenStore`] so that it survives restarts. Call [`Session::restore`] once
//! at launch before any authenticated request.

mod encrypted;

pub use encrypted::EncryptedFileStore;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use thiserror::Error;

use crate::paths;

/// Fixed storage key the token is persisted under
pub const SESSION_KEY: &str = "authToken";

/// Session persistence errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the backing storage failed
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encrypted or decrypted
    #[error("Session storage crypto error: {0}")]
    Crypto(&'static str),

    /// Stored data is not the expected JSON map
    #[error("Session storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistent key-value storage for the session token
pub trait TokenStore: Send + Sync {
    /// Read the value stored under `key`
    fn load(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Store `value` under `key`, replacing any previous value
    fn save(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Delete `key`; deleting a missing key succeeds
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// In-memory token store (for tests and ephemeral sessions)
///
/// Clones share the same entries, which lets a test simulate a restart by
/// building a second [`Session`] over the same store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Holder of the current bearer credential
pub struct Session {
    token: RwLock<Option<String>>,
    store: Box<dyn TokenStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create an empty session persisted to `store`
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            token: RwLock::new(None),
            store: Box::new(store),
        }
    }

    /// Session that is never persisted beyond this process
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Session persisted to the encrypted file in the data directory
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::new(EncryptedFileStore::new(paths::session_path()?)))
    }

    /// Persist `token` and hold it in memory, replacing any previous one
    ///
    /// If persisting fails the session is left unchanged.
    pub fn set_credential(&self, token: &str) -> Result<(), SessionError> {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        self.store.save(SESSION_KEY, token)?;
        *slot = Some(token.to_string());
        Ok(())
    }

    /// Current in-memory token
    pub fn credential(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a token is held in memory
    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Load a previously persisted token into memory
    ///
    /// Returns whether one was found. When none is found the in-memory slot is
    /// left as it was.
    pub fn restore(&self) -> Result<bool, SessionError> {
        match self.store.load(SESSION_KEY)? {
            Some(token) if !token.is_empty() => {
                *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
                tracing::info!("Session token restored from storage");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Remove the token from memory and storage. Idempotent.
    ///
    /// Memory is cleared even if the storage removal fails.
    pub fn clear(&self) -> Result<(), SessionError> {
        let had_token = self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some();
        self.store.remove(SESSION_KEY)?;
        if had_token {
            tracing::info!("Session token cleared");
        }
        Ok(())
    }
}
