//! Store implementations.

use crate::error::StoreError;
use log::{debug, info};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Persistent mapping from string keys to string values.
pub trait Store: Send + Sync {
    /// Load the value for a key, or None when it was never saved.
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Replace the value for a key.
    fn save_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Remove a key. Returns whether it existed.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;
}

/// File-backed store keeping one file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Root directory for stored values.
    root: PathBuf,
}

impl FileStore {
    /// Create a new file-backed store under the given root.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        info!("initialized file store (root={})", root.display());
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the file holding a key.
    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }

    /// Path to the temporary file used while rewriting a key.
    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json.tmp"))
    }
}

impl Store for FileStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!("loaded key (key={}, len={})", key, contents.len());
                Ok(Some(contents))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    /// Rewrite a key atomically through a temp file.
    fn save_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        let temp_path = self.temp_path(key);
        {
            let mut file = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(temp_path, path)?;
        debug!("saved key (key={}, len={})", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let path = self.key_path(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StoreError::Io(err)),
        }
    }
}

/// In-memory store, mostly useful for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.values.lock().remove(key).is_some())
    }
}

/// Keys map directly to file names, so only a conservative charset is allowed.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
