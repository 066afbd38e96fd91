//! Durable key-value storage for history and memory.
//!
//! The calculator only needs two entries, `history` and `memory`, each a JSON
//! document. [`Storage`] is the seam: [`MemoryStorage`] backs tests and
//! ephemeral sessions, [`FileStorage`] keeps one `<key>.json` file per entry.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::history::History;

/// Storage key holding the serialized history list
pub const HISTORY_KEY: &str = "history";

/// Storage key holding the serialized memory value
pub const MEMORY_KEY: &str = "memory";

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised while reading or writing persisted state
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure
    #[error("storage I/O error at {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Value could not be serialized
    #[error("failed to encode '{key}': {source}")]
    Encode {
        /// Storage key
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// Key is not usable as a file name
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),
}

impl StorageError {
    fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// String-keyed durable store, shaped like browser local storage
pub trait Storage: std::fmt::Debug {
    /// Returns the raw value for `key`, or `None` when absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// In-process storage; contents vanish with the value
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a key, e.g. to simulate a previous session
    #[must_use]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Borrowed view of a stored value
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed storage writing `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir` for all keys; the directory is created on first write
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        // Write-then-rename so a crash never leaves a half-written file behind.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(&path, e))?;
        debug!(path = %path.display(), bytes = value.len(), "stored value");
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

/// Persisted slice of the calculator state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub history: History,
    pub memory: f64,
}

/// Loads a snapshot, substituting defaults for anything absent or malformed.
///
/// Never fails: a broken store must not prevent the calculator from starting.
pub fn load_snapshot<S: Storage + ?Sized>(storage: &S) -> Snapshot {
    let history = read_key::<History, S>(storage, HISTORY_KEY).unwrap_or_default();
    let memory = read_key::<f64, S>(storage, MEMORY_KEY)
        .filter(|m| m.is_finite())
        .unwrap_or_default();
    Snapshot { history, memory }
}

/// Writes both keys
pub fn save_snapshot<S: Storage + ?Sized>(
    storage: &mut S,
    history: &History,
    memory: f64,
) -> StorageResult<()> {
    let history_json = serde_json::to_string(history).map_err(|source| StorageError::Encode {
        key: HISTORY_KEY.to_string(),
        source,
    })?;
    let memory_json = serde_json::to_string(&memory).map_err(|source| StorageError::Encode {
        key: MEMORY_KEY.to_string(),
        source,
    })?;
    storage.set(HISTORY_KEY, &history_json)?;
    storage.set(MEMORY_KEY, &memory_json)
}

fn read_key<T, S>(storage: &S, key: &str) -> Option<T>
where
    T: serde::de::DeserializeOwned,
    S: Storage + ?Sized,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "failed to read persisted value, using default");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "malformed persisted value, using default");
            None
        }
    }
}
