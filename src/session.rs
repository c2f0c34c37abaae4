//! Session store holding the active bearer token
//!
//! The token lives in memory and in a durable [`TokenStorage`] under a
//! fixed key, so it survives restarts. Only [`SessionStore::set`] and
//! [`SessionStore::clear`] mutate it; no expiry is tracked locally.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use log::warn;

use crate::error::Result;

/// Durable key/value storage for the bearer token
pub trait TokenStorage: Send + Sync {
    /// Read the value stored under `key`
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn store(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// One file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl TokenStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) if contents.is_empty() => Ok(None),
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Process-local storage, nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

/// Holder of the current bearer token
///
/// Clones share the same token.
#[derive(Clone)]
pub struct SessionStore {
    token: Arc<RwLock<Option<String>>>,
    storage: Arc<dyn TokenStorage>,
    key: String,
}

impl SessionStore {
    /// Open the store, picking up a token persisted by an earlier run
    pub fn open(storage: Arc<dyn TokenStorage>, key: &str) -> Result<Self> {
        let token = storage.load(key)?;
        Ok(Self {
            token: Arc::new(RwLock::new(token)),
            storage,
            key: key.to_string(),
        })
    }

    /// A store backed by [`MemoryStorage`], starting empty
    pub fn in_memory(key: &str) -> Self {
        Self {
            token: Arc::new(RwLock::new(None)),
            storage: Arc::new(MemoryStorage::new()),
            key: key.to_string(),
        }
    }

    /// Current token, `None` when unauthenticated
    pub fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_present(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Replace the token
    ///
    /// If the durable write fails the in-memory token is left untouched.
    pub fn set(&self, token: &str) -> Result<()> {
        let mut current = self.token.write().unwrap_or_else(PoisonError::into_inner);
        self.storage.store(&self.key, token)?;
        *current = Some(token.to_string());
        Ok(())
    }

    /// Forget the token
    ///
    /// Memory is always cleared; a failure to remove the durable copy is
    /// still reported.
    pub fn clear(&self) -> Result<()> {
        let mut current = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *current = None;
        self.storage.remove(&self.key).map_err(|err| {
            warn!("failed to remove persisted token '{}': {}", self.key, err);
            err
        })
    }

    /// Storage key the token is persisted under
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("key", &self.key)
            .field("authenticated", &self.is_present())
            .finish()
    }
}
