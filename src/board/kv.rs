use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid store key: {0:?} (must match [a-zA-Z0-9_-]+)")]
    InvalidKey(String),
}

/// A flat string key-value store, the persistence boundary for the board.
///
/// Reads and writes are synchronous; a `set` overwrites any prior value.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Validate that a key is safe for use as a file name.
fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty()
        || !key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Find the `.karta` store directory by walking up from `start`.
/// Falls back to `<start>/.karta`, which is created on first write.
pub fn find_store_dir(start: &Path) -> PathBuf {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(".karta");
        if candidate.is_dir() {
            return candidate;
        }
        if !dir.pop() {
            return start.join(".karta");
        }
    }
}

/// File-backed store: one file per key under a single directory.
///
/// The directory does not have to exist up front; it is created on the
/// first write. Missing or unreadable keys read as absent.
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Option<String> {
        validate_key(key).ok()?;
        fs::read_to_string(self.dir.join(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(key), value)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral boards.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
