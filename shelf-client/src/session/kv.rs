//! Persisted key-value collaborator
//!
//! The session store and the HTTP client's token lookup both go through
//! [`KvStore`] instead of touching storage directly, so tests can
//! substitute an in-memory fake.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// String key-value store with the semantics of browser local storage:
/// infallible from the caller's point of view, write errors only logged.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data
            .lock()
            .ok()
            .and_then(|data| data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut data) = self.data.lock() {
            data.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut data) = self.data.lock() {
            data.remove(key);
        }
    }
}

/// JSON-file-backed store: `{dir}/session.json`
///
/// The whole map is rewritten on every mutation; reads come from the
/// in-memory copy loaded at construction.
#[derive(Debug)]
pub struct FileKvStore {
    file_path: PathBuf,
    data: Mutex<HashMap<String, String>>,
}

impl FileKvStore {
    /// Load the store from `{dir}/session.json`, starting empty when the
    /// file is absent or unreadable.
    pub fn load(dir: &Path) -> Self {
        let file_path = dir.join("session.json");
        let data = std::fs::read_to_string(&file_path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self {
            file_path,
            data: Mutex::new(data),
        }
    }

    fn persist(&self, data: &HashMap<String, String>) {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.file_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(data)?;
            std::fs::write(&self.file_path, json)
        };
        if let Err(err) = write() {
            tracing::warn!(path = %self.file_path.display(), error = %err, "Failed to persist session file");
        }
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data
            .lock()
            .ok()
            .and_then(|data| data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut data) = self.data.lock() {
            data.insert(key.to_string(), value.to_string());
            self.persist(&data);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut data) = self.data.lock() {
            data.remove(key);
            self.persist(&data);
        }
    }
}
